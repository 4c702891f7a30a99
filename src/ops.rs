// Group/session operations: pure business logic, no App state.
// These take explicit arguments rather than &mut App so they can be
// tested and reasoned about independently of the TUI state machine.

use std::path::PathBuf;

use crate::model::tree::Cursor;
use crate::store::AppData;

/// What a rename or delete applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Group(usize),
    Session(usize, usize),
}

// ── Dialog submissions ────────────────────────────────────────────────────────

/// Add a group. Blank names are rejected with the message the dialog shows.
pub fn create_group(data: &mut AppData, name: &str) -> Result<usize, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Group name cannot be empty");
    }
    Ok(data.add_group(name))
}

/// Add a session to a group. Path and resume token are required; the display
/// name falls back to the token when left blank.
pub fn create_session(
    data: &mut AppData,
    group_idx: usize,
    path: &str,
    resume_token: &str,
    display_name: &str,
) -> Result<usize, &'static str> {
    let path = path.trim();
    let token = resume_token.trim();
    if path.is_empty() || token.is_empty() {
        return Err("Path and Session ID are required");
    }
    let name = match display_name.trim() {
        "" => token,
        d => d,
    };
    data.add_session(group_idx, name, token, path)
        .ok_or("Group no longer exists")
}

/// Rename a group or session in place. The stored id, sessions, path and
/// token are untouched; only the display name changes.
pub fn rename(data: &mut AppData, target: Target, new_name: &str) -> Result<(), &'static str> {
    let name = new_name.trim();
    if name.is_empty() {
        return Err("Name cannot be empty");
    }
    match target {
        Target::Group(gi) => {
            if let Some(group) = data.groups.get_mut(gi) {
                group.name = name.to_string();
            }
        }
        Target::Session(gi, si) => {
            if let Some(sess) = data.groups.get_mut(gi).and_then(|g| g.sessions.get_mut(si)) {
                sess.name = name.to_string();
            }
        }
    }
    Ok(())
}

// ── Deletion ──────────────────────────────────────────────────────────────────

/// Delete a group, returning its name for the status line.
pub fn delete_group(data: &mut AppData, group_idx: usize) -> Option<String> {
    let name = data.groups.get(group_idx).map(|g| g.name.clone())?;
    data.delete_group(group_idx);
    Some(name)
}

/// Delete a session, returning its name for the status line.
pub fn delete_session(data: &mut AppData, group_idx: usize, session_idx: usize) -> Option<String> {
    let name = data
        .groups
        .get(group_idx)?
        .sessions
        .get(session_idx)
        .map(|s| s.name.clone())?;
    data.delete_session(group_idx, session_idx);
    Some(name)
}

/// Cursor after a group deletion: the same slot if one still exists there,
/// else the last remaining group, else the (empty) top.
pub fn cursor_after_group_delete(data: &AppData, deleted_idx: usize) -> Cursor {
    if data.groups.is_empty() {
        return Cursor::group(0);
    }
    Cursor::group(deleted_idx.min(data.groups.len() - 1))
}

/// Cursor after a session deletion: stays inside the group, moving up one
/// slot if the tail was removed, or back to the header when none remain.
pub fn cursor_after_session_delete(data: &AppData, group_idx: usize, deleted_idx: usize) -> Cursor {
    let remaining = data.groups.get(group_idx).map(|g| g.sessions.len()).unwrap_or(0);
    if remaining == 0 {
        Cursor::group(group_idx)
    } else {
        Cursor::session(group_idx, deleted_idx.min(remaining - 1))
    }
}

// ── Paths ─────────────────────────────────────────────────────────────────────

pub fn expand_path(s: &str) -> PathBuf {
    if s.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(&s[2..]);
        }
    }
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_with(groups: &[(&str, &[&str])]) -> AppData {
        let mut data = AppData::default();
        for (name, sessions) in groups {
            let gi = data.add_group(name);
            for s in *sessions {
                data.add_session(gi, s, "tok", "~/p").unwrap();
            }
        }
        data
    }

    #[test]
    fn create_group_rejects_blank_names() {
        let mut data = AppData::default();
        assert_eq!(create_group(&mut data, ""), Err("Group name cannot be empty"));
        assert_eq!(create_group(&mut data, "   "), Err("Group name cannot be empty"));
        assert!(data.groups.is_empty());
    }

    #[test]
    fn create_group_trims_the_name() {
        let mut data = AppData::default();
        let gi = create_group(&mut data, "  Work  ").unwrap();
        assert_eq!(data.groups[gi].name, "Work");
    }

    #[test]
    fn create_session_requires_path_and_token() {
        let mut data = data_with(&[("Work", &[])]);
        assert_eq!(
            create_session(&mut data, 0, "", "abc", "api"),
            Err("Path and Session ID are required")
        );
        assert_eq!(
            create_session(&mut data, 0, "~/p", "  ", "api"),
            Err("Path and Session ID are required")
        );
        assert!(data.groups[0].sessions.is_empty());
    }

    #[test]
    fn display_name_falls_back_to_the_token() {
        let mut data = data_with(&[("Work", &[])]);
        let si = create_session(&mut data, 0, "~/p", "abc123", "").unwrap();
        assert_eq!(data.groups[0].sessions[si].name, "abc123");
        assert_eq!(data.groups[0].sessions[si].resume_token, "abc123");

        let si = create_session(&mut data, 0, "~/p", "def456", "api-refactor").unwrap();
        assert_eq!(data.groups[0].sessions[si].name, "api-refactor");
    }

    #[test]
    fn rename_rejects_blank_names() {
        let mut data = data_with(&[("Work", &["api"])]);
        assert_eq!(rename(&mut data, Target::Group(0), " "), Err("Name cannot be empty"));
        assert_eq!(data.groups[0].name, "Work");
    }

    #[test]
    fn rename_changes_only_the_display_name() {
        let mut data = data_with(&[("Work", &["api"])]);
        let old_id = data.groups[0].sessions[0].id.clone();
        rename(&mut data, Target::Session(0, 0), "api-v2").unwrap();
        let sess = &data.groups[0].sessions[0];
        assert_eq!(sess.name, "api-v2");
        assert_eq!(sess.id, old_id);
        assert_eq!(sess.resume_token, "tok");

        rename(&mut data, Target::Group(0), "Projects").unwrap();
        assert_eq!(data.groups[0].name, "Projects");
        assert_eq!(data.groups[0].sessions.len(), 1);
    }

    #[test]
    fn delete_returns_the_name_for_the_status_line() {
        let mut data = data_with(&[("Work", &["api", "web"])]);
        assert_eq!(delete_session(&mut data, 0, 1), Some("web".to_string()));
        assert_eq!(data.groups[0].sessions.len(), 1);
        assert_eq!(delete_group(&mut data, 0), Some("Work".to_string()));
        assert!(data.groups.is_empty());
    }

    #[test]
    fn delete_out_of_range_returns_none() {
        let mut data = data_with(&[("Work", &[])]);
        assert_eq!(delete_group(&mut data, 5), None);
        assert_eq!(delete_session(&mut data, 0, 0), None);
        assert_eq!(data.groups.len(), 1);
    }

    #[test]
    fn cursor_moves_up_when_the_last_group_goes() {
        let mut data = data_with(&[("A", &[]), ("B", &[])]);
        delete_group(&mut data, 1);
        assert_eq!(cursor_after_group_delete(&data, 1), Cursor::group(0));
    }

    #[test]
    fn cursor_stays_put_when_a_middle_group_goes() {
        let mut data = data_with(&[("A", &[]), ("B", &[]), ("C", &[])]);
        delete_group(&mut data, 1);
        assert_eq!(cursor_after_group_delete(&data, 1), Cursor::group(1));
    }

    #[test]
    fn cursor_rests_on_top_when_no_groups_remain() {
        let mut data = data_with(&[("A", &[])]);
        delete_group(&mut data, 0);
        assert_eq!(cursor_after_group_delete(&data, 0), Cursor::group(0));
    }

    #[test]
    fn cursor_falls_back_to_header_when_last_session_goes() {
        let mut data = data_with(&[("Work", &["api"])]);
        delete_session(&mut data, 0, 0);
        assert_eq!(cursor_after_session_delete(&data, 0, 0), Cursor::group(0));
    }

    #[test]
    fn cursor_clamps_to_the_new_tail_session() {
        let mut data = data_with(&[("Work", &["api", "web"])]);
        delete_session(&mut data, 0, 1);
        assert_eq!(cursor_after_session_delete(&data, 0, 1), Cursor::session(0, 0));
    }

    #[test]
    fn expand_path_resolves_home_prefix() {
        assert_eq!(expand_path("/tmp/x"), PathBuf::from("/tmp/x"));
        assert_eq!(expand_path("rel/x"), PathBuf::from("rel/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/projects/api"), home.join("projects/api"));
        }
    }
}

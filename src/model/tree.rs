// Flattened tree rows and cursor movement for the group/session panel.

use crate::store::Group;

/// One visible row of the tree panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlatEntry {
    Group { group_idx: usize },
    Session { group_idx: usize, session_idx: usize },
}

/// Tree position: a group header, or a session inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub group: usize,
    pub session: Option<usize>,
}

impl Cursor {
    pub fn group(group: usize) -> Self {
        Cursor { group, session: None }
    }

    pub fn session(group: usize, session: usize) -> Self {
        Cursor { group, session: Some(session) }
    }

    pub fn is_header(&self) -> bool {
        self.session.is_none()
    }
}

/// Visible rows in display order. Sessions of collapsed groups are hidden;
/// groups without an expansion flag count as open.
pub fn flatten(groups: &[Group], expanded: &[bool]) -> Vec<FlatEntry> {
    let mut flat = Vec::new();
    for (gi, group) in groups.iter().enumerate() {
        flat.push(FlatEntry::Group { group_idx: gi });
        if expanded.get(gi).copied().unwrap_or(true) {
            for si in 0..group.sessions.len() {
                flat.push(FlatEntry::Session { group_idx: gi, session_idx: si });
            }
        }
    }
    flat
}

pub fn cursor_of(entry: FlatEntry) -> Cursor {
    match entry {
        FlatEntry::Group { group_idx } => Cursor::group(group_idx),
        FlatEntry::Session { group_idx, session_idx } => Cursor::session(group_idx, session_idx),
    }
}

/// Row index of the cursor in the flat list; a stale cursor maps to the top.
pub fn flat_index(flat: &[FlatEntry], cursor: Cursor) -> usize {
    flat.iter().position(|&e| cursor_of(e) == cursor).unwrap_or(0)
}

/// Move the cursor by `delta` rows, clamped at both ends.
pub fn move_cursor(flat: &[FlatEntry], cursor: Cursor, delta: isize) -> Cursor {
    if flat.is_empty() {
        return cursor;
    }
    let idx = flat_index(flat, cursor) as isize;
    let max = flat.len() as isize - 1;
    cursor_of(flat[(idx + delta).clamp(0, max) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Group, Session};
    use chrono::Utc;

    fn group(name: &str, sessions: &[&str]) -> Group {
        Group {
            id: name.to_string(),
            name: name.to_string(),
            sessions: sessions
                .iter()
                .map(|s| Session {
                    id: (*s).to_string(),
                    name: (*s).to_string(),
                    resume_token: "tok".to_string(),
                    path: "~/p".to_string(),
                    created_at: Utc::now(),
                })
                .collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn flatten_interleaves_headers_and_sessions() {
        let groups = vec![group("Work", &["api", "web"]), group("Play", &["toy"])];
        let flat = flatten(&groups, &[true, true]);
        assert_eq!(
            flat,
            vec![
                FlatEntry::Group { group_idx: 0 },
                FlatEntry::Session { group_idx: 0, session_idx: 0 },
                FlatEntry::Session { group_idx: 0, session_idx: 1 },
                FlatEntry::Group { group_idx: 1 },
                FlatEntry::Session { group_idx: 1, session_idx: 0 },
            ]
        );
    }

    #[test]
    fn collapsed_groups_hide_their_sessions() {
        let groups = vec![group("Work", &["api", "web"]), group("Play", &["toy"])];
        let flat = flatten(&groups, &[false, true]);
        assert_eq!(
            flat,
            vec![
                FlatEntry::Group { group_idx: 0 },
                FlatEntry::Group { group_idx: 1 },
                FlatEntry::Session { group_idx: 1, session_idx: 0 },
            ]
        );
    }

    #[test]
    fn missing_expansion_flags_default_to_open() {
        let groups = vec![group("Work", &["api"]), group("Play", &["toy"])];
        let flat = flatten(&groups, &[false]);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[2], FlatEntry::Session { group_idx: 1, session_idx: 0 });
    }

    #[test]
    fn movement_clamps_at_both_ends() {
        let groups = vec![group("Work", &["api"])];
        let flat = flatten(&groups, &[true]);
        let top = Cursor::group(0);
        assert_eq!(move_cursor(&flat, top, -1), top);
        let bottom = move_cursor(&flat, top, 10);
        assert_eq!(bottom, Cursor::session(0, 0));
        assert_eq!(move_cursor(&flat, bottom, 1), bottom);
    }

    #[test]
    fn movement_steps_over_hidden_sessions() {
        let groups = vec![group("Work", &["api", "web"]), group("Play", &[])];
        let flat = flatten(&groups, &[false, true]);
        let next = move_cursor(&flat, Cursor::group(0), 1);
        assert_eq!(next, Cursor::group(1));
    }

    #[test]
    fn empty_tree_leaves_cursor_unchanged() {
        let cursor = Cursor::group(0);
        assert_eq!(move_cursor(&[], cursor, 1), cursor);
    }

    #[test]
    fn stale_cursor_maps_to_the_top_row() {
        let groups = vec![group("Work", &["api"])];
        let flat = flatten(&groups, &[true]);
        // points at a session that no longer exists
        assert_eq!(flat_index(&flat, Cursor::session(0, 7)), 0);
        assert_eq!(move_cursor(&flat, Cursor::session(0, 7), 1), Cursor::session(0, 0));
    }
}

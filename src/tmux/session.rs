// tmux session management via CLI
// ref: tmux(1)

use std::collections::HashSet;
use std::path::Path;
use std::process::Stdio;

use anyhow::Result;

use super::{stderr_detail, tmux_cmd, tmux_silent, TmuxError};

/// Check if tmux is available.
pub fn is_available() -> bool {
    tmux_cmd(&["-V"]).stdout(Stdio::null()).stderr(Stdio::null())
        .status().map(|s| s.success()).unwrap_or(false)
}

/// Derive the tmux session identifier for a (group, session) name pair.
///
/// `claude_<group>_<session>` with every character outside `[A-Za-z0-9_-]`
/// replaced by `_`, underscores trimmed from both ends, capped at 64 chars.
/// Recomputed on demand, never stored: renaming either side changes which
/// tmux session the pair addresses. Distinct pairs can collide after
/// replacement; both rows then track the same tmux session.
pub fn session_ident(group: &str, session: &str) -> String {
    let raw = format!("claude_{}_{}", group, session);
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    let mut ident: String = cleaned.trim_matches('_').chars().take(64).collect();
    // truncation can re-expose a trailing separator
    while ident.ends_with('_') {
        ident.pop();
    }
    ident
}

/// Return true if a named session exists.
pub fn session_exists(ident: &str) -> bool {
    tmux_silent(&["has-session", "-t", ident])
        .status().map(|s| s.success()).unwrap_or(false)
}

/// Create a detached session at `workdir` running `claude -r <resume_token>`.
pub fn create_session(ident: &str, workdir: &Path, resume_token: &str) -> Result<(), TmuxError> {
    let shell_cmd = format!("claude -r {}", resume_token);
    let workdir = workdir.to_string_lossy();
    let output = tmux_cmd(&["new-session", "-d", "-s", ident, "-c", &workdir, &shell_cmd])
        .output()
        .map_err(|e| TmuxError::Launch { ident: ident.to_string(), detail: e.to_string() })?;
    if !output.status.success() {
        return Err(TmuxError::Launch {
            ident: ident.to_string(),
            detail: stderr_detail(&output),
        });
    }
    Ok(())
}

/// Kill a session by name.
pub fn kill_session(ident: &str) -> Result<(), TmuxError> {
    let output = tmux_cmd(&["kill-session", "-t", ident])
        .output()
        .map_err(|e| TmuxError::Kill { ident: ident.to_string(), detail: e.to_string() })?;
    if !output.status.success() {
        return Err(TmuxError::Kill {
            ident: ident.to_string(),
            detail: stderr_detail(&output),
        });
    }
    Ok(())
}

/// Names of all live sessions. A listing failure (including tmux's
/// "no server running" when nothing is up) reads as nothing live.
pub fn list_live() -> HashSet<String> {
    let Ok(output) = tmux_cmd(&["list-sessions", "-F", "#{session_name}"]).output()
    else { return HashSet::new() };
    if !output.status.success() {
        return HashSet::new();
    }
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// attach-session — takes over the terminal until tmux exits.
/// Call with raw mode disabled and the alternate screen left.
pub fn attach_foreground(ident: &str) -> Result<std::process::ExitStatus> {
    Ok(tmux_cmd(&["attach-session", "-t", ident]).status()?)
}

/// Send literal text to a session's active pane (`-l`, no key-name lookup).
pub fn send_text(ident: &str, text: &str) -> Result<(), TmuxError> {
    let output = tmux_cmd(&["send-keys", "-t", ident, "-l", text])
        .output()
        .map_err(|e| TmuxError::Send { ident: ident.to_string(), detail: e.to_string() })?;
    if !output.status.success() {
        return Err(TmuxError::Send {
            ident: ident.to_string(),
            detail: stderr_detail(&output),
        });
    }
    Ok(())
}

/// Send a named key to a session's active pane (e.g. "Enter", "C-c").
pub fn send_special(ident: &str, key_name: &str) -> Result<(), TmuxError> {
    let output = tmux_cmd(&["send-keys", "-t", ident, key_name])
        .output()
        .map_err(|e| TmuxError::Send { ident: ident.to_string(), detail: e.to_string() })?;
    if !output.status.success() {
        return Err(TmuxError::Send {
            ident: ident.to_string(),
            detail: stderr_detail(&output),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{kill_session, session_ident};

    fn is_legal(ident: &str) -> bool {
        ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }

    #[test]
    fn ident_is_deterministic() {
        assert_eq!(session_ident("Work", "api"), session_ident("Work", "api"));
        assert_eq!(session_ident("Work", "api"), "claude_Work_api");
    }

    #[test]
    fn ident_replaces_illegal_chars() {
        let ident = session_ident("My Group!", "fix/parser");
        assert_eq!(ident, "claude_My_Group__fix_parser");
        assert!(is_legal(&ident));
    }

    #[test]
    fn ident_has_no_edge_underscores() {
        // both names reduce to underscores entirely
        assert_eq!(session_ident("___", "!!!"), "claude");
    }

    #[test]
    fn ident_never_exceeds_64_chars() {
        let long = "x".repeat(200);
        let ident = session_ident(&long, &long);
        assert_eq!(ident.chars().count(), 64);
        assert!(is_legal(&ident));
    }

    #[test]
    fn ident_trims_underscore_exposed_by_truncation() {
        // 63 chars before the separator, so the cut lands right on it
        let group = "g".repeat(56);
        let ident = session_ident(&group, "tail");
        assert_eq!(ident.chars().count(), 63);
        assert!(!ident.ends_with('_'));
    }

    #[test]
    fn ident_contains_no_path_separator() {
        let ident = session_ident("Work", "~/projects/my-app");
        assert!(!ident.contains('/'));
        assert!(is_legal(&ident));
    }

    #[test]
    fn unicode_collapses_to_underscores() {
        let ident = session_ident("日本語", "api");
        assert!(is_legal(&ident));
        assert_eq!(ident, "claude_____api");
    }

    #[test]
    fn renaming_changes_the_derived_ident() {
        // A rename re-derives the identifier, so a session still running
        // under the old name shows as stopped afterwards.
        assert_ne!(session_ident("Work", "api"), session_ident("Projects", "api"));
    }

    #[test]
    fn kill_on_a_missing_session_reports_the_failure() {
        // Errors the same way whether tmux is absent or the session is:
        // both end up as a Kill error naming the command.
        let err = kill_session("claude_test_no_such_session_93d1").unwrap_err();
        assert!(err.to_string().contains("kill-session"));
        assert!(err.to_string().contains("claude_test_no_such_session_93d1"));
    }
}

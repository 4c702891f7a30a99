pub mod capture;
pub mod keys;
pub mod session;

use std::process::{Command, Stdio};

use thiserror::Error;

/// Bridge-level failures. None of these abort the app; each surfaces as a
/// status-line message and the state in memory stays as it was.
#[derive(Debug, Error)]
pub enum TmuxError {
    #[error("tmux new-session failed for '{ident}': {detail}")]
    Launch { ident: String, detail: String },
    #[error("tmux kill-session failed for '{ident}': {detail}")]
    Kill { ident: String, detail: String },
    #[error("tmux capture-pane failed for '{ident}': {detail}")]
    Capture { ident: String, detail: String },
    #[error("tmux send-keys failed for '{ident}': {detail}")]
    Send { ident: String, detail: String },
}

/// tmux command with pre-set args.
pub fn tmux_cmd(args: &[&str]) -> Command {
    let mut cmd = Command::new("tmux");
    cmd.args(args);
    cmd
}

/// tmux command with stdout/stderr suppressed.
pub fn tmux_silent(args: &[&str]) -> Command {
    let mut cmd = Command::new("tmux");
    cmd.args(args).stdout(Stdio::null()).stderr(Stdio::null());
    cmd
}

/// Stderr of a finished command, trimmed, for error reporting.
pub(crate) fn stderr_detail(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

// tmux capture-pane for the preview panel

use super::{stderr_detail, tmux_cmd, TmuxError};

/// Capture the last `lines` lines of a session's active pane, plain text.
pub fn capture_pane(ident: &str, lines: u32) -> Result<String, TmuxError> {
    let start = format!("-{}", lines);
    let output = tmux_cmd(&["capture-pane", "-t", ident, "-p", "-S", &start])
        .output()
        .map_err(|e| TmuxError::Capture { ident: ident.to_string(), detail: e.to_string() })?;
    if !output.status.success() {
        return Err(TmuxError::Capture {
            ident: ident.to_string(),
            detail: stderr_detail(&output),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

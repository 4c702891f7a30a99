// claude-sm: tmux-backed Claude CLI session manager TUI
// Organizes long-running sessions into named groups via ratatui interface.

mod app;
mod event;
mod model;
mod ops;
mod store;
mod tmux;
mod tui;
mod ui;

use anyhow::{Context, Result};

use app::App;
use store::Store;

fn main() -> Result<()> {
    if let Some(arg) = std::env::args().nth(1) {
        if arg == "--version" || arg == "-v" {
            println!(
                "claude-sm {} ({})",
                env!("CARGO_PKG_VERSION"),
                option_env!("CLAUDE_SM_COMMIT").unwrap_or("unknown")
            );
            return Ok(());
        }
    }

    // Require tmux
    if !tmux::session::is_available() {
        eprintln!("Error: tmux is not installed. Please install tmux first.");
        std::process::exit(1);
    }

    // Open the store before taking over the terminal so load errors
    // print on a normal screen.
    let store = match Store::open() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    let mut terminal = tui::init().context("terminal init failed")?;

    let result = App::new(store).run(&mut terminal);

    // Always restore terminal, even on error
    let _ = tui::restore(&mut terminal);

    result
}

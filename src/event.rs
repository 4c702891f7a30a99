// Terminal polling plus the channel background threads report through.

use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::tmux::TmuxError;

/// Pane snapshot taken for the session that was selected when the
/// refresh started. Tagged with the tmux ident so a stale snapshot can
/// be dropped if the selection moved meanwhile.
#[derive(Debug, Clone)]
pub struct CaptureSnapshot {
    pub ident: String,
    pub content: String,
}

/// What background threads report back to the main loop.
#[derive(Debug)]
pub enum AppEvent {
    /// Periodic poll result: the live session names, plus the selected
    /// session's pane content when it was live.
    Refresh {
        live: HashSet<String>,
        capture: Option<CaptureSnapshot>,
    },
    /// A forwarded keystroke finished.
    SendDone(Result<(), TmuxError>),
}

/// Cloneable sender half. Sending after the receiver is gone (app is
/// shutting down) quietly drops the event.
#[derive(Clone, Debug)]
pub struct EventSender {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSender {
    pub fn send(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

pub fn channel() -> (EventSender, Receiver<AppEvent>) {
    let (tx, rx) = mpsc::channel();
    (EventSender { tx }, rx)
}

/// Poll the terminal for one key press. Repeat and release events are
/// dropped so a held key cannot double-fire dialogs.
pub fn poll_key(timeout: Duration) -> Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_delivers_to_the_receiver() {
        let (tx, rx) = channel();
        tx.send(AppEvent::Refresh { live: HashSet::new(), capture: None });
        match rx.recv_timeout(Duration::from_secs(1)).unwrap() {
            AppEvent::Refresh { live, capture } => {
                assert!(live.is_empty());
                assert!(capture.is_none());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn send_survives_a_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);
        tx.send(AppEvent::SendDone(Ok(())));
    }

    #[test]
    fn clones_feed_the_same_receiver() {
        let (tx, rx) = channel();
        let tx2 = tx.clone();
        std::thread::spawn(move || tx2.send(AppEvent::SendDone(Ok(()))));
        assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());
    }
}

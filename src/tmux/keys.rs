// keystroke -> tmux send-keys argument translation for interact mode

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a keystroke becomes on its way to tmux.
#[derive(Debug, PartialEq, Eq)]
pub enum Forward {
    /// A tmux key name for `send-keys` (e.g. "Enter", "C-c").
    Special(String),
    /// Literal text for `send-keys -l`.
    Text(String),
    /// Leave interact mode instead of forwarding.
    Exit,
    /// No tmux equivalent; swallow it.
    Ignore,
}

/// tmux key name for a non-character key, if it has one.
fn named_key(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Enter => "Enter",
        KeyCode::Backspace => "BSpace",
        KeyCode::Tab => "Tab",
        KeyCode::BackTab => "BTab",
        KeyCode::Esc => "Escape",
        KeyCode::Up => "Up",
        KeyCode::Down => "Down",
        KeyCode::Left => "Left",
        KeyCode::Right => "Right",
        KeyCode::Delete => "DC",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PPage",
        KeyCode::PageDown => "NPage",
        KeyCode::Insert => "IC",
        KeyCode::F(n @ 1..=12) => return Some(format!("F{}", n)),
        _ => return None,
    };
    Some(name.to_string())
}

fn chord(prefix: &str, code: KeyCode) -> Forward {
    match named_key(code) {
        Some(name) => Forward::Special(format!("{}-{}", prefix, name)),
        None => Forward::Ignore,
    }
}

/// Map a key event to its forwarding action. Ctrl+q is reserved as the
/// exit chord; every other ctrl/alt chord goes through with a `C-`/`M-`
/// prefix, on characters and named keys alike.
pub fn translate(key: KeyEvent) -> Forward {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') => Forward::Exit,
            KeyCode::Char(c) => Forward::Special(format!("C-{}", c)),
            code => chord("C", code),
        };
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char(c) => Forward::Special(format!("M-{}", c)),
            code => chord("M", code),
        };
    }
    match key.code {
        KeyCode::Char(c) => Forward::Text(c.to_string()),
        code => match named_key(code) {
            Some(name) => Forward::Special(name),
            None => Forward::Ignore,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn with(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn ctrl_q_exits_instead_of_forwarding() {
        assert_eq!(
            translate(with(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Forward::Exit
        );
    }

    #[test]
    fn plain_chars_go_through_as_literal_text() {
        assert_eq!(translate(plain(KeyCode::Char('a'))), Forward::Text("a".into()));
        assert_eq!(translate(plain(KeyCode::Char(' '))), Forward::Text(" ".into()));
        assert_eq!(
            translate(with(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Forward::Text("A".into())
        );
    }

    #[test]
    fn ctrl_chords_use_c_prefix() {
        assert_eq!(
            translate(with(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Forward::Special("C-c".into())
        );
    }

    #[test]
    fn alt_chords_use_m_prefix() {
        assert_eq!(
            translate(with(KeyCode::Char('x'), KeyModifiers::ALT)),
            Forward::Special("M-x".into())
        );
    }

    #[test]
    fn named_keys_use_tmux_names() {
        assert_eq!(translate(plain(KeyCode::Enter)), Forward::Special("Enter".into()));
        assert_eq!(translate(plain(KeyCode::Backspace)), Forward::Special("BSpace".into()));
        assert_eq!(translate(plain(KeyCode::Esc)), Forward::Special("Escape".into()));
        assert_eq!(translate(plain(KeyCode::Delete)), Forward::Special("DC".into()));
        assert_eq!(translate(plain(KeyCode::PageUp)), Forward::Special("PPage".into()));
        assert_eq!(translate(plain(KeyCode::PageDown)), Forward::Special("NPage".into()));
        assert_eq!(translate(plain(KeyCode::Insert)), Forward::Special("IC".into()));
        assert_eq!(
            translate(with(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Forward::Special("BTab".into())
        );
    }

    #[test]
    fn chords_on_named_keys_keep_the_key_name() {
        assert_eq!(
            translate(with(KeyCode::Up, KeyModifiers::CONTROL)),
            Forward::Special("C-Up".into())
        );
        assert_eq!(
            translate(with(KeyCode::Right, KeyModifiers::ALT)),
            Forward::Special("M-Right".into())
        );
        assert_eq!(
            translate(with(KeyCode::Home, KeyModifiers::CONTROL)),
            Forward::Special("C-Home".into())
        );
        assert_eq!(
            translate(with(KeyCode::Enter, KeyModifiers::ALT)),
            Forward::Special("M-Enter".into())
        );
    }

    #[test]
    fn function_keys_forward_by_number() {
        assert_eq!(translate(plain(KeyCode::F(1))), Forward::Special("F1".into()));
        assert_eq!(translate(plain(KeyCode::F(12))), Forward::Special("F12".into()));
    }

    #[test]
    fn keys_without_tmux_equivalent_are_swallowed() {
        assert_eq!(translate(plain(KeyCode::CapsLock)), Forward::Ignore);
        assert_eq!(
            translate(with(KeyCode::CapsLock, KeyModifiers::CONTROL)),
            Forward::Ignore
        );
    }
}

// Single-line input field state: byte-offset cursor over a UTF-8 buffer.

/// Hard cap on field contents, counted in chars.
const CHAR_LIMIT: usize = 256;

pub struct InputState {
    pub buffer: String,
    pub cursor: usize, // byte offset
    pub label: String,
    pub placeholder: String,
}

impl InputState {
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            label: label.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Field pre-filled with a value, cursor at the end.
    pub fn with_value(
        label: impl Into<String>,
        placeholder: impl Into<String>,
        value: String,
    ) -> Self {
        let cursor = value.len();
        Self {
            buffer: value,
            cursor,
            label: label.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if self.buffer.chars().count() >= CHAR_LIMIT {
            return;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.buffer[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.buffer.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.buffer[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.buffer.len() {
            if let Some(c) = self.buffer[self.cursor..].chars().next() {
                self.cursor += c.len_utf8();
            }
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in chars, for terminal cursor placement.
    pub fn display_cursor(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_handle_multibyte_chars() {
        let mut input = InputState::new("Name:", "");
        input.insert_char('a');
        input.insert_char('é');
        input.insert_char('b');
        assert_eq!(input.value(), "aéb");
        assert_eq!(input.display_cursor(), 3);

        input.backspace();
        input.backspace();
        assert_eq!(input.value(), "a");
        assert_eq!(input.display_cursor(), 1);
    }

    #[test]
    fn cursor_moves_by_whole_chars() {
        let mut input = InputState::new("Name:", "");
        for c in "aéb".chars() {
            input.insert_char(c);
        }
        input.cursor_left();
        input.cursor_left();
        assert_eq!(input.display_cursor(), 1);
        input.insert_char('x');
        assert_eq!(input.value(), "axéb");
        input.cursor_right();
        assert_eq!(input.display_cursor(), 3);
    }

    #[test]
    fn prefilled_field_starts_with_cursor_at_the_end() {
        let mut input = InputState::with_value("New name:", "old", "old".to_string());
        assert_eq!(input.display_cursor(), 3);
        input.insert_char('!');
        assert_eq!(input.value(), "old!");
    }

    #[test]
    fn edits_at_the_left_edge_are_safe() {
        let mut input = InputState::new("Name:", "");
        input.backspace();
        input.cursor_left();
        assert_eq!(input.value(), "");
        assert_eq!(input.display_cursor(), 0);
    }

    #[test]
    fn char_limit_stops_further_input() {
        let mut input = InputState::new("Name:", "");
        for _ in 0..300 {
            input.insert_char('x');
        }
        assert_eq!(input.value().chars().count(), 256);
    }
}

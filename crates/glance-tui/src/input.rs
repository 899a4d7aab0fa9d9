//! Key input and the search query editor.
//!
//! Terminal key codes are converted to [`KeyInput`] before they reach any
//! state machine, so the shell and the editor are testable without a
//! terminal.

use crossterm::event::KeyCode;

/// Key input events from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Character input.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
}

impl KeyInput {
    /// Convert a crossterm key code. `None` for keys Glance ignores.
    pub fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char(c) => Some(Self::Char(c)),
            KeyCode::Enter => Some(Self::Enter),
            KeyCode::Backspace => Some(Self::Backspace),
            KeyCode::Delete => Some(Self::Delete),
            KeyCode::Tab => Some(Self::Tab),
            KeyCode::Esc => Some(Self::Esc),
            KeyCode::Left => Some(Self::Left),
            KeyCode::Right => Some(Self::Right),
            KeyCode::Up => Some(Self::Up),
            KeyCode::Down => Some(Self::Down),
            KeyCode::Home => Some(Self::Home),
            KeyCode::End => Some(Self::End),
            _ => None,
        }
    }
}

/// What a key did to the query editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Still editing.
    Editing,
    /// Enter pressed; carries the submitted text.
    Submit(String),
    /// Escape pressed; editing abandoned.
    Cancel,
}

/// Single-line text editor for the search box.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Default)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current cursor position, in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle a key input event.
    pub fn handle_key(&mut self, key: KeyInput) -> InputOutcome {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyInput::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyInput::Home => self.cursor = 0,
            KeyInput::End => self.cursor = self.len(),
            KeyInput::Enter => {
                self.cursor = 0;
                return InputOutcome::Submit(std::mem::take(&mut self.buffer));
            },
            KeyInput::Esc => {
                self.buffer.clear();
                self.cursor = 0;
                return InputOutcome::Cancel;
            },
            KeyInput::Tab | KeyInput::Up | KeyInput::Down => {},
        }
        InputOutcome::Editing
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputState {
        let mut input = InputState::new();
        for c in text.chars() {
            input.handle_key(KeyInput::Char(c));
        }
        input
    }

    #[test]
    fn char_input_adds_to_buffer() {
        let input = typed("hi");

        assert_eq!(input.buffer(), "hi");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn backspace_removes_char() {
        let mut input = typed("ab");
        input.handle_key(KeyInput::Backspace);

        assert_eq!(input.buffer(), "a");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn enter_submits_and_clears() {
        let mut input = typed("lake");

        assert_eq!(input.handle_key(KeyInput::Enter), InputOutcome::Submit("lake".into()));
        assert!(input.buffer().is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn esc_cancels() {
        let mut input = typed("lake");

        assert_eq!(input.handle_key(KeyInput::Esc), InputOutcome::Cancel);
        assert!(input.buffer().is_empty());
    }

    #[test]
    fn cursor_movement() {
        let mut input = typed("abc");

        input.handle_key(KeyInput::Home);
        assert_eq!(input.cursor(), 0);

        input.handle_key(KeyInput::End);
        assert_eq!(input.cursor(), 3);

        input.handle_key(KeyInput::Left);
        assert_eq!(input.cursor(), 2);

        input.handle_key(KeyInput::Right);
        input.handle_key(KeyInput::Right);
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn multibyte_characters_edit_cleanly() {
        let mut input = typed("café");
        input.handle_key(KeyInput::Left);
        input.handle_key(KeyInput::Char('!'));
        assert_eq!(input.buffer(), "caf!é");

        input.handle_key(KeyInput::Delete);
        assert_eq!(input.buffer(), "caf!");
    }

    #[test]
    fn unsupported_keys_are_dropped() {
        assert_eq!(KeyInput::from_code(KeyCode::F(5)), None);
        assert_eq!(KeyInput::from_code(KeyCode::Char('q')), Some(KeyInput::Char('q')));
    }
}

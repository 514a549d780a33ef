//! Single-line text capture for modal input dialogs.
//!
//! A `TextInput` owns the keyboard while its dialog is open. It edits its
//! buffer in place and reports only the outcomes the owning screen cares
//! about: submit or cancel. Validation belongs to the screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Mask glyph shown in place of each secret character.
const MASK_CHAR: char = '•';

/// How the buffer is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    PlainText,
    /// Never rendered verbatim.
    Secret,
}

/// What a key press meant to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The buffer or cursor changed.
    Edited,
    /// Key consumed without effect.
    Ignored,
    /// Enter: the owner should validate and commit.
    Submit,
    /// Esc: the owner should close the dialog.
    Cancel,
}

/// Editable single-line buffer.
///
/// `cursor` is a char index into `buffer`, `0..=len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    kind: InputKind,
    buffer: String,
    cursor: usize,
    limit: Option<usize>,
    error: Option<String>,
}

impl TextInput {
    /// Visible input with no length limit.
    pub fn plain() -> Self {
        TextInput {
            kind: InputKind::PlainText,
            buffer: String::new(),
            cursor: 0,
            limit: None,
            error: None,
        }
    }

    /// Masked input accepting at most `limit` characters.
    pub fn secret(limit: usize) -> Self {
        TextInput {
            kind: InputKind::Secret,
            limit: Some(limit),
            ..TextInput::plain()
        }
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show a validation message under the field. Cleared on the next edit.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Text safe to put on screen.
    pub fn display(&self) -> String {
        match self.kind {
            InputKind::PlainText => self.buffer.clone(),
            InputKind::Secret => MASK_CHAR.to_string().repeat(self.len()),
        }
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    /// Apply a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputEvent {
        let event = match key.code {
            KeyCode::Enter => return InputEvent::Submit,
            KeyCode::Esc => return InputEvent::Cancel,
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(c)
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    InputEvent::Ignored
                } else {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                    InputEvent::Edited
                }
            }
            KeyCode::Delete => {
                if self.cursor >= self.len() {
                    InputEvent::Ignored
                } else {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                    InputEvent::Edited
                }
            }
            KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_to((self.cursor + 1).min(self.len())),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.len()),
            _ => InputEvent::Ignored,
        };

        if event == InputEvent::Edited {
            self.error = None;
        }
        event
    }

    fn insert(&mut self, c: char) -> InputEvent {
        if self.limit.is_some_and(|limit| self.len() >= limit) {
            return InputEvent::Ignored;
        }
        let at = self.byte_offset(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
        InputEvent::Edited
    }

    fn move_to(&mut self, cursor: usize) -> InputEvent {
        if cursor == self.cursor {
            InputEvent::Ignored
        } else {
            self.cursor = cursor;
            InputEvent::Edited
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut TextInput, s: &str) {
        for c in s.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_appends_at_cursor() {
        let mut input = TextInput::plain();
        type_str(&mut input, "models");
        assert_eq!(input.value(), "models");
        assert_eq!(input.cursor(), 6);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut input = TextInput::plain();
        type_str(&mut input, "~/mdels");
        for _ in 0..4 {
            input.handle_key(key(KeyCode::Left));
        }
        input.handle_key(key(KeyCode::Char('o')));
        assert_eq!(input.value(), "~/models");
    }

    #[test]
    fn backspace_and_delete() {
        let mut input = TextInput::plain();
        type_str(&mut input, "abc");
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), InputEvent::Edited);
        assert_eq!(input.value(), "ab");

        input.handle_key(key(KeyCode::Home));
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), InputEvent::Ignored);
        assert_eq!(input.handle_key(key(KeyCode::Delete)), InputEvent::Edited);
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn multibyte_characters_edit_cleanly() {
        let mut input = TextInput::plain();
        type_str(&mut input, "/tmp/modèle");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "/tmp/modle");
    }

    #[test]
    fn enter_and_esc_report_outcomes() {
        let mut input = TextInput::plain();
        assert_eq!(input.handle_key(key(KeyCode::Enter)), InputEvent::Submit);
        assert_eq!(input.handle_key(key(KeyCode::Esc)), InputEvent::Cancel);
    }

    #[test]
    fn q_is_text_not_quit() {
        let mut input = TextInput::plain();
        assert_eq!(input.handle_key(key(KeyCode::Char('q'))), InputEvent::Edited);
        assert_eq!(input.value(), "q");
    }

    #[test]
    fn control_chords_are_ignored() {
        let mut input = TextInput::plain();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.handle_key(ctrl_c), InputEvent::Ignored);
        assert!(input.value().is_empty());
    }

    #[test]
    fn secret_is_masked_and_limited() {
        let mut input = TextInput::secret(4);
        type_str(&mut input, "sk-123");
        assert_eq!(input.value(), "sk-1");
        assert_eq!(input.display(), "••••");
        assert!(!input.display().contains("sk"));
    }

    #[test]
    fn editing_clears_error() {
        let mut input = TextInput::plain();
        input.set_error("bad");
        assert_eq!(input.error(), Some("bad"));
        type_str(&mut input, "x");
        assert_eq!(input.error(), None);
    }
}

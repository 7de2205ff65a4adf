//! Single-line text field with a character cursor

use crate::input_key::InputKey;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters, `0..=len`
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set(&mut self, value: impl Into<String>) {
        *self = Self::with_value(value);
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Take the value, leaving the field empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Apply an editing key. Returns `false` if the key is not an edit.
    pub fn handle_key(&mut self, key: InputKey) -> bool {
        match key {
            InputKey::Backspace => self.backspace(),
            InputKey::Delete => self.delete(),
            InputKey::Left => self.cursor = self.cursor.saturating_sub(1),
            InputKey::Right => self.cursor = (self.cursor + 1).min(self.value.chars().count()),
            InputKey::Home | InputKey::CharCtrl('a') => self.cursor = 0,
            InputKey::End | InputKey::CharCtrl('e') => self.cursor = self.value.chars().count(),
            InputKey::CharCtrl('u') => self.clear(),
            other => match other.typed_char() {
                Some(c) => self.insert(c),
                None => return false,
            },
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut input = TextInput::new();
        for c in "héllo".chars() {
            input.insert(c);
        }
        assert_eq!(input.value(), "héllo");
        input.handle_key(InputKey::Left);
        input.handle_key(InputKey::Left);
        input.handle_key(InputKey::Left);
        input.backspace();
        assert_eq!(input.value(), "hllo");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut input = TextInput::with_value("ab");
        input.delete();
        assert_eq!(input.value(), "ab");
        input.handle_key(InputKey::Home);
        input.delete();
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn test_non_edit_keys_are_reported() {
        let mut input = TextInput::new();
        assert!(!input.handle_key(InputKey::Enter));
        assert!(!input.handle_key(InputKey::Esc));
        assert!(input.handle_key(InputKey::Char('x')));
        assert!(input.handle_key(InputKey::CharCtrl('u')));
        assert!(input.is_empty());
    }

    #[test]
    fn test_take_resets() {
        let mut input = TextInput::with_value("send me");
        assert_eq!(input.take(), "send me");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }
}

/// Single-line text input with a cursor measured in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        TextField { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn before_cursor(&self) -> &str {
        &self.value[..self.byte_index(self.cursor)]
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replaces the whole value and parks the cursor at the end.
    pub fn set(&mut self, value: impl Into<String>) {
        *self = TextField::new(value);
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
    }

    pub fn delete_forward(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.len();
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_at_cursor() {
        let mut field = TextField::new("Mlk");
        field.move_to_start();
        field.move_cursor_right();
        field.insert_char('i');
        assert_eq!(field.value(), "Milk");
        assert_eq!(field.before_cursor(), "Mi");
    }

    #[test]
    fn backspace_and_delete_handle_multibyte_chars() {
        let mut field = TextField::new("café!");
        field.delete_char();
        assert_eq!(field.value(), "café");
        field.move_cursor_left();
        field.delete_forward();
        assert_eq!(field.value(), "caf");
        field.move_to_start();
        field.delete_char();
        assert_eq!(field.value(), "caf");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut field = TextField::new("ab");
        field.move_cursor_right();
        assert_eq!(field.before_cursor(), "ab");
        field.move_to_start();
        field.move_cursor_left();
        assert_eq!(field.before_cursor(), "");
    }

    #[test]
    fn before_cursor_slices_on_char_boundaries() {
        let mut field = TextField::new("漢字ab");
        field.move_cursor_left();
        field.move_cursor_left();
        assert_eq!(field.before_cursor(), "漢字");
    }

    #[test]
    fn set_replaces_value() {
        let mut field = TextField::new("old");
        field.move_to_start();
        field.set("2%");
        assert_eq!(field.value(), "2%");
        assert_eq!(field.before_cursor(), "2%");
    }
}

// Dataentry Entry Buffer
// Raw text plus cursor, with truncation to a maximum length

/// Default maximum entry length in characters
pub const DEFAULT_MAX_LENGTH: usize = 1024;

/// Cursor movement request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// Move by a signed number of characters
    By(isize),
    /// Jump to an absolute character position
    To(usize),
    Start,
    End,
}

/// The text being accumulated
///
/// Positions and lengths count characters, not bytes. The raw text never
/// exceeds `max_length` characters after a mutation; inserts that overflow are
/// truncated from the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryBuffer {
    raw: String,
    /// Cursor position in characters, `0..=len`
    cursor: usize,
    /// Cached character count of `raw`
    len: usize,
    max_length: usize,
}

impl EntryBuffer {
    /// Create an empty buffer
    pub fn new(max_length: usize) -> Self {
        Self {
            raw: String::new(),
            cursor: 0,
            len: 0,
            max_length: max_length.max(1),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the raw text in characters
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Change the maximum length, truncating the current text if needed
    pub fn set_max_length(&mut self, max_length: usize) {
        self.max_length = max_length.max(1);
        self.truncate();
    }

    /// Insert `text` at character `position`
    ///
    /// A position past the end appends. If the insertion happens at or before
    /// the cursor, the cursor moves along with the text after it.
    pub fn insert_at(&mut self, position: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let position = position.min(self.len);
        let byte = self.byte_offset(position);
        self.raw.insert_str(byte, text);

        let inserted = text.chars().count();
        self.len += inserted;
        if position <= self.cursor {
            self.cursor += inserted;
        }
        self.truncate();
    }

    /// Insert `text` at the cursor
    pub fn insert(&mut self, text: &str) {
        self.insert_at(self.cursor, text);
    }

    /// Delete up to `count` characters starting at character `position`
    ///
    /// Returns the number of characters removed.
    pub fn delete_at(&mut self, position: usize, count: usize) -> usize {
        if position >= self.len || count == 0 {
            return 0;
        }
        let end = position.saturating_add(count).min(self.len);
        let start_byte = self.byte_offset(position);
        let end_byte = self.byte_offset(end);
        self.raw.drain(start_byte..end_byte);

        let removed = end - position;
        self.len -= removed;
        if self.cursor > position {
            self.cursor -= removed.min(self.cursor - position);
        }
        removed
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.delete_at(self.cursor - 1, 1) == 1
    }

    /// Delete the character after the cursor
    pub fn delete(&mut self) -> bool {
        self.delete_at(self.cursor, 1) == 1
    }

    /// Move the cursor, clamping to the text
    pub fn move_cursor(&mut self, movement: CursorMove) {
        self.cursor = match movement {
            CursorMove::By(delta) => self.cursor.saturating_add_signed(delta).min(self.len),
            CursorMove::To(position) => position.min(self.len),
            CursorMove::Start => 0,
            CursorMove::End => self.len,
        };
    }

    /// Replace the whole text and put the cursor at the end
    pub fn set(&mut self, text: &str) {
        self.raw = text.to_string();
        self.len = self.raw.chars().count();
        self.cursor = self.len;
        self.truncate();
    }

    /// Empty the text and reset the cursor
    pub fn clear(&mut self) {
        self.raw.clear();
        self.cursor = 0;
        self.len = 0;
    }

    /// The raw text with `glyph` inserted at the cursor
    pub fn cursor_display(&self, glyph: &str) -> String {
        let byte = self.byte_offset(self.cursor);
        let mut out = String::with_capacity(self.raw.len() + glyph.len());
        out.push_str(&self.raw[..byte]);
        out.push_str(glyph);
        out.push_str(&self.raw[byte..]);
        out
    }

    fn truncate(&mut self) {
        if self.len > self.max_length {
            let byte = self.byte_offset(self.max_length);
            self.raw.truncate(byte);
            self.len = self.max_length;
        }
        self.cursor = self.cursor.min(self.len);
    }

    /// Byte index of character `position` (or the end of the text)
    fn byte_offset(&self, position: usize) -> usize {
        self.raw
            .char_indices()
            .nth(position)
            .map_or(self.raw.len(), |(i, _)| i)
    }
}

impl Default for EntryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(text: &str, max: usize) -> EntryBuffer {
        let mut buffer = EntryBuffer::new(max);
        buffer.insert(text);
        buffer
    }

    #[test]
    fn test_insert_advances_cursor() {
        let mut buffer = EntryBuffer::new(10);
        buffer.insert("12");
        buffer.insert("3");
        assert_eq!(buffer.raw(), "123");
        assert_eq!(buffer.cursor(), 3);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_insert_after_cursor_keeps_cursor() {
        let mut buffer = buffer_with("abc", 10);
        buffer.move_cursor(CursorMove::To(1));
        buffer.insert_at(2, "X");
        assert_eq!(buffer.raw(), "abXc");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn test_insert_then_delete_restores_state() {
        for position in 0..=4 {
            for cursor in 0..=4 {
                let mut buffer = buffer_with("abcd", 100);
                buffer.move_cursor(CursorMove::To(cursor));
                let before = buffer.clone();

                buffer.insert_at(position, "xyz");
                buffer.delete_at(position, 3);

                assert_eq!(buffer, before, "position {} cursor {}", position, cursor);
            }
        }
    }

    #[test]
    fn test_truncation_keeps_exactly_max_length() {
        let mut buffer = buffer_with("123", 5);
        buffer.insert("4567");
        assert_eq!(buffer.raw(), "12345");
        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.cursor(), 5);
    }

    #[test]
    fn test_truncation_drops_tail_when_inserting_in_middle() {
        let mut buffer = buffer_with("abcd", 5);
        buffer.move_cursor(CursorMove::To(1));
        buffer.insert("XY");
        assert_eq!(buffer.raw(), "aXYbc");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_set_max_length_truncates() {
        let mut buffer = buffer_with("abcdef", 10);
        buffer.set_max_length(3);
        assert_eq!(buffer.raw(), "abc");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut buffer = buffer_with("abc", 10);
        assert!(buffer.backspace());
        assert_eq!(buffer.raw(), "ab");
        assert!(!buffer.delete());

        buffer.move_cursor(CursorMove::Start);
        assert!(!buffer.backspace());
        assert!(buffer.delete());
        assert_eq!(buffer.raw(), "b");
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_delete_range_before_cursor() {
        let mut buffer = buffer_with("abcdef", 10);
        buffer.move_cursor(CursorMove::To(4));
        assert_eq!(buffer.delete_at(1, 10), 5);
        assert_eq!(buffer.raw(), "a");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn test_move_cursor_clamps() {
        let mut buffer = buffer_with("abc", 10);
        buffer.move_cursor(CursorMove::By(-10));
        assert_eq!(buffer.cursor(), 0);
        buffer.move_cursor(CursorMove::By(2));
        assert_eq!(buffer.cursor(), 2);
        buffer.move_cursor(CursorMove::By(10));
        assert_eq!(buffer.cursor(), 3);
        buffer.move_cursor(CursorMove::To(99));
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_cursor_display() {
        let mut buffer = buffer_with("12€4", 10);
        assert_eq!(buffer.cursor_display("|"), "12€4|");
        buffer.move_cursor(CursorMove::To(3));
        assert_eq!(buffer.cursor_display("|"), "12€|4");
        buffer.clear();
        assert_eq!(buffer.cursor_display("_"), "_");
    }

    #[test]
    fn test_multibyte_lengths() {
        let buffer = buffer_with("äöü", 2);
        assert_eq!(buffer.raw(), "äö");
        assert_eq!(buffer.len(), 2);
    }
}

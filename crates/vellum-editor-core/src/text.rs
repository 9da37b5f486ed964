//! Text buffer abstraction for editor storage.
//!
//! All offsets are in Unicode scalar values (chars), not bytes. The trait
//! exists so the document logic stays independent of the storage backend;
//! `EditorRope` is the ropey-backed implementation used everywhere today.

use std::ops::Range;

use smol_str::SmolStr;

pub trait TextBuffer {
    /// Total length in bytes (UTF-8).
    fn len_bytes(&self) -> usize;

    /// Total length in chars (Unicode scalar values).
    fn len_chars(&self) -> usize;

    /// Number of lines, counting the line after a trailing newline.
    fn len_lines(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Insert text at char offset. Offsets past the end clamp to the end.
    fn insert(&mut self, char_offset: usize, text: &str);

    /// Delete a char range. Out-of-bounds ends clamp to the buffer length.
    fn delete(&mut self, char_range: Range<usize>);

    /// Replace a char range with text.
    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        self.delete(char_range.clone());
        self.insert(char_range.start, text);
    }

    /// Get a slice as SmolStr. Returns None if the range is invalid.
    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr>;

    /// Get the character at an offset. Returns None if out of bounds.
    fn char_at(&self, char_offset: usize) -> Option<char>;

    /// The whole buffer as a String.
    fn contents(&self) -> String;

    /// Convert a char offset to a byte offset.
    fn char_to_byte(&self, char_offset: usize) -> usize;

    /// Convert a byte offset to a char offset.
    fn byte_to_char(&self, byte_offset: usize) -> usize;
}

/// Ropey-backed text buffer.
///
/// O(log n) edits and offset conversions, which keeps per-keystroke
/// re-renders cheap even on large documents.
#[derive(Debug, Clone, Default)]
pub struct EditorRope {
    rope: ropey::Rope,
}

impl EditorRope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
        }
    }
}

impl TextBuffer for EditorRope {
    fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        let offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        let end = char_range.end.min(self.rope.len_chars());
        let start = char_range.start.min(end);
        self.rope.remove(start..end);
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        let slice = self.rope.get_slice(char_range)?;
        Some(SmolStr::new(slice.to_string()))
    }

    fn char_at(&self, char_offset: usize) -> Option<char> {
        self.rope.get_char(char_offset)
    }

    fn contents(&self) -> String {
        String::from(&self.rope)
    }

    fn char_to_byte(&self, char_offset: usize) -> usize {
        let offset = char_offset.min(self.rope.len_chars());
        self.rope.char_to_byte(offset)
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        let offset = byte_offset.min(self.rope.len_bytes());
        self.rope.byte_to_char(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_delete_round_trip() {
        let mut buffer = EditorRope::from_str("hello world");
        buffer.insert(5, ",");
        assert_eq!(buffer.contents(), "hello, world");
        buffer.delete(5..6);
        assert_eq!(buffer.contents(), "hello world");
    }

    #[test]
    fn replace_swaps_a_range() {
        let mut buffer = EditorRope::from_str("hello world");
        buffer.replace(6..11, "there");
        assert_eq!(buffer.contents(), "hello there");
    }

    #[test]
    fn offsets_are_char_based() {
        let mut buffer = EditorRope::from_str("héllo");
        assert_eq!(buffer.len_chars(), 5);
        assert_eq!(buffer.len_bytes(), 6);
        assert_eq!(buffer.char_to_byte(2), 3);
        assert_eq!(buffer.byte_to_char(3), 2);
        buffer.insert(5, "!");
        assert_eq!(buffer.contents(), "héllo!");
    }

    #[test]
    fn out_of_bounds_edits_clamp() {
        let mut buffer = EditorRope::from_str("abc");
        buffer.insert(100, "!");
        assert_eq!(buffer.contents(), "abc!");
        buffer.delete(2..100);
        assert_eq!(buffer.contents(), "ab");
    }

    #[test]
    fn slice_and_char_at() {
        let buffer = EditorRope::from_str("abc\ndef");
        assert_eq!(buffer.slice(4..7).as_deref(), Some("def"));
        assert_eq!(buffer.char_at(3), Some('\n'));
        assert_eq!(buffer.char_at(7), None);
        assert_eq!(buffer.len_lines(), 2);
    }
}

//! Random-access view of input text, with line/column positions.

use lrkit_core::Position;

/// Read-only, random-access view over input bytes.
///
/// The DFA's cached transitions are byte-indexed (§6: the automaton's
/// 256-entry cached table dispatches on "the low-byte of the next code
/// unit"), so the buffer's unit of access is a byte, not a `char`.
pub struct TextBuffer<'a> {
    bytes: &'a [u8],
    /// Byte offset of the start of each line (line 0 starts at offset 0).
    line_starts: Vec<usize>,
}

impl<'a> TextBuffer<'a> {
    pub fn new(text: &'a str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { bytes, line_starts }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The byte at `i`, or `None` past the end.
    pub fn get_value(&self, i: usize) -> Option<u8> {
        self.bytes.get(i).copied()
    }

    /// True iff `i` is at or past the end of the buffer.
    pub fn is_end(&self, i: usize) -> bool {
        i >= self.bytes.len()
    }

    /// 1-based `{line, column}` for byte offset `i`. Out-of-range `i` yields
    /// the position one past the end of the buffer.
    pub fn get_position_at(&self, i: usize) -> Position {
        let i = i.min(self.bytes.len());
        let line_idx = match self.line_starts.binary_search(&i) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let column = i - self.line_starts[line_idx] + 1;
        Position::new(line_idx as u32 + 1, column as u32)
    }
}

use std::rc::Rc;

/// Cursor over an immutable text buffer.
///
/// Positions are byte offsets into the buffer. The lexer only ever advances by
/// the length of a regex match, so the cursor always sits on a char boundary.
#[derive(Debug, Clone)]
pub struct SourceReader {
    buffer: Rc<str>,
    pos: usize,
}

impl SourceReader {
    pub fn new(source: &str) -> Self {
        SourceReader {
            buffer: Rc::from(source),
            pos: 0,
        }
    }

    pub fn source(&self) -> &str {
        &self.buffer
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the character under the cursor, `None` at end of input.
    pub fn current(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    /// The unread tail of the buffer.
    pub fn remainder(&self) -> &str {
        &self.buffer[self.pos..]
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.buffer.len()
    }

    /// Moves the cursor forward, clamping at the end of the buffer.
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.buffer.len());
    }

    /// Moves the cursor backward, clamping at the start of the buffer.
    pub fn retreat(&mut self, n: usize) {
        self.pos = self.pos.saturating_sub(n);
    }

    /// 1-based line number of `pos`.
    ///
    /// Scans the buffer, so this is O(n). Only used for diagnostics.
    pub fn line_of(&self, pos: usize) -> usize {
        let pos = pos.min(self.buffer.len());
        self.buffer.as_bytes()[..pos]
            .iter()
            .filter(|b| **b == b'\n')
            .count()
            + 1
    }

    /// Byte bounds `(start, end)` of the line containing `pos`, newline excluded.
    pub fn line_bounds(&self, pos: usize) -> (usize, usize) {
        let bytes = self.buffer.as_bytes();
        let pos = pos.min(bytes.len());

        let start = bytes[..pos]
            .iter()
            .rposition(|b| *b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let end = bytes[pos..]
            .iter()
            .position(|b| *b == b'\n')
            .map(|i| pos + i)
            .unwrap_or(bytes.len());

        (start, end)
    }

    /// 0-based column of `pos` within its line.
    pub fn column_of(&self, pos: usize) -> usize {
        let pos = pos.min(self.buffer.len());
        pos - self.line_bounds(pos).0
    }

    /// Text of the line containing `pos`.
    pub fn line_text(&self, pos: usize) -> &str {
        let (start, end) = self.line_bounds(pos);
        &self.buffer[start..end]
    }
}

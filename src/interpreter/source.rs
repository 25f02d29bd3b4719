use crate::ast::SourceSpan;

/// One step of the source reader: a decoded code point or the end of input.
///
/// The end of input is a distinct variant rather than a reserved `char`, so it
/// can never collide with a scalar value present in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceChar {
    /// A decoded Unicode scalar value.
    Char(char),
    /// The cursor is at the end of the input.
    EndOfFile,
}

impl SourceChar {
    /// Returns the decoded character, or `None` at the end of input.
    #[must_use]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Char(c) => Some(c),
            Self::EndOfFile => None,
        }
    }

    #[must_use]
    pub const fn is(self, expected: char) -> bool {
        matches!(self, Self::Char(c) if c == expected)
    }
}

/// Walks a UTF-8 buffer one code point at a time.
///
/// The reader tracks two offsets: the start of the token being read and the
/// scan cursor. [`SourceReader::flush`] hands out the text between them and
/// starts a new token at the cursor.
///
/// Decoding is per code point. A malformed sequence advances the cursor by
/// exactly one byte and yields `None` for that step, so a caller can report
/// it and resynchronize.
///
/// # Example
/// ```
/// use tcalc::interpreter::source::{SourceChar, SourceReader};
///
/// let mut reader = SourceReader::new("π+1");
/// assert_eq!(reader.forward(), Some(SourceChar::Char('π')));
/// let (span, text) = reader.flush();
/// assert_eq!((span.start, span.end), (0, 2));
/// assert_eq!(text, "π");
/// assert_eq!(reader.peek(), Some(SourceChar::Char('+')));
/// ```
#[derive(Debug, Clone)]
pub struct SourceReader {
    input:   Vec<u8>,
    start:   usize,
    cursor:  usize,
    current: Option<SourceChar>,
}

impl SourceReader {
    /// Creates a reader over `input`, which may contain malformed UTF-8.
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self { input:   input.into(),
               start:   0,
               cursor:  0,
               current: None, }
    }

    /// Decodes the code point at `index` and returns it with its encoded
    /// length, or `None` when the bytes there are malformed.
    fn decode_at(&self, index: usize) -> Option<(char, usize)> {
        let end = (index + 4).min(self.input.len());
        let chunk = &self.input[index..end];
        let valid = match std::str::from_utf8(chunk) {
            Ok(text) => text,
            Err(err) => std::str::from_utf8(&chunk[..err.valid_up_to()]).ok()?,
        };
        let c = valid.chars().next()?;
        Some((c, c.len_utf8()))
    }

    /// Returns the next code point without consuming it.
    ///
    /// # Returns
    /// - `Some(SourceChar::Char(c))` for a well-formed code point.
    /// - `Some(SourceChar::EndOfFile)` at the end of the input.
    /// - `None` when the next bytes are not valid UTF-8.
    #[must_use]
    pub fn peek(&self) -> Option<SourceChar> {
        if self.cursor >= self.input.len() {
            return Some(SourceChar::EndOfFile);
        }
        self.decode_at(self.cursor).map(|(c, _)| SourceChar::Char(c))
    }

    /// Returns up to `count` upcoming code points without consuming them.
    ///
    /// Stops early at the end of input. A malformed sequence contributes
    /// U+FFFD and is skipped one byte at a time.
    #[must_use]
    pub fn peek_many(&self, count: usize) -> Vec<char> {
        let mut out = Vec::with_capacity(count);
        let mut index = self.cursor;
        while out.len() < count && index < self.input.len() {
            if let Some((c, len)) = self.decode_at(index) {
                out.push(c);
                index += len;
            } else {
                out.push(char::REPLACEMENT_CHARACTER);
                index += 1;
            }
        }
        out
    }

    /// Consumes and returns the next code point.
    ///
    /// At the end of input the cursor stays put and `EndOfFile` is returned.
    /// A malformed sequence moves the cursor forward by one byte and yields
    /// `None`.
    pub fn forward(&mut self) -> Option<SourceChar> {
        self.current = if self.cursor >= self.input.len() {
            Some(SourceChar::EndOfFile)
        } else if let Some((c, len)) = self.decode_at(self.cursor) {
            self.cursor += len;
            Some(SourceChar::Char(c))
        } else {
            self.cursor += 1;
            None
        };
        self.current
    }

    /// Consumes `count` code points.
    pub fn forward_many(&mut self, count: usize) {
        for _ in 0..count {
            self.forward();
        }
    }

    /// The code point returned by the most recent [`SourceReader::forward`].
    #[must_use]
    pub const fn current(&self) -> Option<SourceChar> {
        self.current
    }

    /// Byte length of the token read so far.
    #[must_use]
    pub const fn token_length(&self) -> usize {
        self.cursor - self.start
    }

    /// Byte offset of the scan cursor.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor
    }

    /// Returns the span and text of the current token and starts a new one
    /// at the cursor.
    ///
    /// Malformed bytes inside the token are replaced by U+FFFD in the text;
    /// the span always refers to the raw input.
    pub fn flush(&mut self) -> (SourceSpan, String) {
        let span = SourceSpan::new(self.start, self.cursor);
        let text = String::from_utf8_lossy(&self.input[self.start..self.cursor]).into_owned();
        self.discard_token();
        (span, text)
    }

    /// Starts a new token at the cursor without producing anything.
    pub const fn discard_token(&mut self) {
        self.start = self.cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_multibyte_code_points() {
        let mut reader = SourceReader::new("a²√");
        assert_eq!(reader.forward(), Some(SourceChar::Char('a')));
        assert_eq!(reader.forward(), Some(SourceChar::Char('²')));
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.forward(), Some(SourceChar::Char('√')));
        assert_eq!(reader.forward(), Some(SourceChar::EndOfFile));
        assert_eq!(reader.forward(), Some(SourceChar::EndOfFile));
        assert_eq!(reader.position(), 6);
    }

    #[test]
    fn malformed_bytes_advance_one_at_a_time() {
        let mut reader = SourceReader::new(vec![0xFF, 0xC3, b'x']);
        assert_eq!(reader.peek(), None);
        assert_eq!(reader.forward(), None);
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.forward(), None);
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.forward(), Some(SourceChar::Char('x')));
        assert_eq!(reader.current(), Some(SourceChar::Char('x')));
    }

    #[test]
    fn peek_many_does_not_consume() {
        let reader = SourceReader::new("e+5");
        assert_eq!(reader.peek_many(3), vec!['e', '+', '5']);
        assert_eq!(reader.peek_many(10), vec!['e', '+', '5']);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn flush_and_discard_track_token_start() {
        let mut reader = SourceReader::new("  12");
        reader.forward_many(2);
        reader.discard_token();
        reader.forward_many(2);
        assert_eq!(reader.token_length(), 2);
        let (span, text) = reader.flush();
        assert_eq!(span, SourceSpan::new(2, 4));
        assert_eq!(text, "12");
        assert_eq!(reader.token_length(), 0);
    }
}

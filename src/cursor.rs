//! Byte cursor over the source text.
//!
//! Every read past the end of input yields `\n`, so scanning rules can treat
//! "ran off the end" exactly like "hit the end of the line".

use crate::Range;

/// Sentinel returned for reads at or past the end of input.
pub const EOL: u8 = b'\n';

/// A cursor for byte-by-byte scanning with bounded lookahead.
///
/// # Example
/// ```
/// use mdscan::cursor::Cursor;
///
/// let mut cursor = Cursor::new(b"ab");
/// assert_eq!(cursor.current(), b'a');
/// assert_eq!(cursor.peek(1), b'b');
/// assert_eq!(cursor.advance(), b'b');
/// assert_eq!(cursor.advance(), b'\n');
/// assert!(cursor.is_eof());
/// ```
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor over a byte slice.
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Create a cursor starting at an offset.
    #[inline]
    pub fn new_at(input: &'a [u8], offset: usize) -> Self {
        debug_assert!(offset <= input.len());
        Self {
            input,
            pos: offset.min(input.len()),
        }
    }

    /// Current offset from the start of input.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Number of bytes remaining.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Check if cursor is at end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The byte under the cursor, or `\n` at end of input.
    #[inline]
    pub fn current(&self) -> u8 {
        self.peek(0)
    }

    /// The byte `n` positions ahead, or `\n` past end of input.
    #[inline]
    pub fn peek(&self, n: usize) -> u8 {
        self.input.get(self.pos + n).copied().unwrap_or(EOL)
    }

    /// The byte just behind the cursor; `None` at offset 0.
    #[inline]
    pub fn previous(&self) -> Option<u8> {
        self.pos.checked_sub(1).map(|p| self.input[p])
    }

    /// Move one byte forward and return the new current byte.
    #[inline]
    pub fn advance(&mut self) -> u8 {
        if !self.is_eof() {
            self.pos += 1;
        }
        self.current()
    }

    /// Advance by up to `n` bytes.
    #[inline]
    pub fn advance_by(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Check if current position matches a byte.
    #[inline]
    pub fn at(&self, b: u8) -> bool {
        !self.is_eof() && self.input[self.pos] == b
    }

    /// Consume a specific byte if present.
    #[inline]
    pub fn eat(&mut self, b: u8) -> bool {
        if self.at(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skip spaces, returning how many were skipped.
    #[inline]
    pub fn skip_spaces(&mut self) -> usize {
        let start = self.pos;
        while self.at(b' ') {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Length of the run of `b` starting at the cursor, without moving.
    #[inline]
    pub fn run_length(&self, b: u8) -> usize {
        self.input[self.pos..].iter().take_while(|&&c| c == b).count()
    }

    /// Offset of the next newline relative to the cursor.
    #[inline]
    pub fn find_newline(&self) -> Option<usize> {
        memchr::memchr(b'\n', &self.input[self.pos..])
    }

    /// Absolute offset where the current line ends (its `\n` or end of input).
    #[inline]
    pub fn line_end(&self) -> usize {
        match self.find_newline() {
            Some(pos) => self.pos + pos,
            None => self.input.len(),
        }
    }

    /// Range from the cursor to the end of the line, without moving.
    ///
    /// A trailing `\r` is excluded.
    #[inline]
    pub fn rest_of_line(&self) -> Range {
        Range::from_usize(self.pos, self.line_end()).without_cr(self.input)
    }

    /// Consume the rest of the line including its newline, returning the
    /// content range (newline and trailing `\r` excluded).
    #[inline]
    pub fn consume_line(&mut self) -> Range {
        let range = self.rest_of_line();
        self.pos = self.line_end();
        self.eat(b'\n');
        range
    }

    /// Range of the line after the current one, without moving.
    ///
    /// Returns `None` when the current line is the last one.
    pub fn next_line(&self) -> Option<Range> {
        let end = self.line_end();
        if end >= self.input.len() {
            return None;
        }
        Some(Cursor::new_at(self.input, end + 1).rest_of_line())
    }

    /// 1-based line number of the cursor position.
    pub fn line_number(&self) -> usize {
        memchr::memchr_iter(b'\n', &self.input[..self.pos]).count() + 1
    }

    /// The underlying input.
    #[inline]
    pub fn input(&self) -> &'a [u8] {
        self.input
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.offset())
            .field("remaining", &self.remaining())
            .finish()
    }
}

//! Compact byte ranges into the source text.
//!
//! Uses `u32` offsets. The block scanner refuses input longer than
//! [`MAX_INPUT_LEN`](crate::limits::MAX_INPUT_LEN), so every offset it hands
//! out fits.

/// Half-open byte range into the source buffer.
///
/// # Example
/// ```
/// use mdscan::Range;
///
/// let input = "Hello, World!";
/// let range = Range::new(0, 5);
/// assert_eq!(range.as_str(input), "Hello");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

const _: () = assert!(std::mem::size_of::<Range>() == 8);

impl Range {
    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a range from usize offsets, which must not exceed `u32::MAX`.
    #[inline]
    pub fn from_usize(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= u32::MAX as usize);
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    /// Bytes covered by this range.
    #[inline]
    pub fn slice<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        &input[self.start as usize..self.end as usize]
    }

    /// Text covered by this range.
    ///
    /// Ranges produced by the scanners always start and end next to ASCII
    /// bytes, so they fall on character boundaries.
    #[inline]
    pub fn as_str<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start as usize..self.end as usize]
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Drop a trailing carriage return so CRLF lines look like LF lines.
    #[inline]
    pub fn without_cr(self, input: &[u8]) -> Self {
        if self.end > self.start && input[self.end as usize - 1] == b'\r' {
            Self::new(self.start, self.end - 1)
        } else {
            self
        }
    }

    /// Trim trailing spaces and tabs.
    pub fn trim_end(self, input: &[u8]) -> Self {
        let mut end = self.end;
        while end > self.start && matches!(input[end as usize - 1], b' ' | b'\t') {
            end -= 1;
        }
        Self::new(self.start, end)
    }

    /// True when the range holds only spaces and tabs.
    pub fn is_blank(&self, input: &[u8]) -> bool {
        self.slice(input).iter().all(|&b| b == b' ' || b == b'\t')
    }
}

impl From<std::ops::Range<usize>> for Range {
    #[inline]
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::from_usize(r.start, r.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_size() {
        assert_eq!(std::mem::size_of::<Range>(), 8);
    }

    #[test]
    fn test_range_slice() {
        let input = "Hello, World!";
        assert_eq!(Range::new(7, 12).as_str(input), "World");
        assert_eq!(Range::new(0, 5).slice(input.as_bytes()), b"Hello");
        assert_eq!(Range::new(3, 3).len(), 0);
        assert!(Range::new(3, 3).is_empty());
    }

    #[test]
    fn test_range_without_cr() {
        let input = b"line\r\n";
        assert_eq!(Range::new(0, 5).without_cr(input), Range::new(0, 4));
        assert_eq!(Range::new(0, 4).without_cr(input), Range::new(0, 4));
        assert_eq!(Range::new(0, 0).without_cr(input), Range::new(0, 0));
    }

    #[test]
    fn test_range_trim_end() {
        let input = b"abc \t ";
        assert_eq!(Range::new(0, 6).trim_end(input), Range::new(0, 3));
        assert!(Range::new(3, 6).is_blank(input));
        assert!(!Range::new(2, 6).is_blank(input));
    }

    #[test]
    fn test_range_from_std_range() {
        let r: Range = (10usize..20usize).into();
        assert_eq!(r, Range::new(10, 20));
    }
}

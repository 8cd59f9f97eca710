//! Code span matching.
//!
//! Code spans have highest precedence among inline elements.
//! Backtick runs must match exactly.

/// Find the closing backtick run of exactly `len` backticks in
/// `text[from..end]`. Returns its start offset.
pub fn find_closer(text: &[u8], from: usize, end: usize, len: usize) -> Option<usize> {
    let mut pos = from;
    while pos < end {
        let offset = memchr::memchr(b'`', &text[pos..end])?;
        let run_start = pos + offset;
        let run_len = run_length(text, run_start, end, b'`');
        if run_len == len {
            return Some(run_start);
        }
        pos = run_start + run_len;
    }
    None
}

/// Length of the run of `ch` starting at `pos`, bounded by `end`.
#[inline]
pub fn run_length(text: &[u8], pos: usize, end: usize, ch: u8) -> usize {
    text[pos..end].iter().take_while(|&&b| b == ch).count()
}

//! Closing-delimiter search for bold, italic and strikethrough.
//!
//! A closer is searched left to right from just after the opener. Escaped
//! bytes, code spans and links are skipped, and runs of the same character
//! with the wrong length belong to nested markup, so they are stepped over.

use super::code_span;
use super::link;
use super::memo::SearchMemo;
use super::run::InlineRun;
use crate::escape::is_escapable;

/// Delimiter being matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    /// Marker byte (`*`, `_` or `~`).
    pub ch: u8,
    /// Number of marker bytes that open and close (1 or 2).
    pub len: usize,
    /// Whether a longer run of 3+ may end with this closer (`***`).
    pub allow_longer: bool,
}

impl Delimiter {
    /// Number of distinct delimiters, see [`Delimiter::slot`].
    pub const SLOTS: usize = 5;

    pub const fn bold(ch: u8) -> Self {
        Self {
            ch,
            len: 2,
            allow_longer: true,
        }
    }

    pub const fn italic(ch: u8) -> Self {
        Self {
            ch,
            len: 1,
            allow_longer: true,
        }
    }

    pub const fn strikethrough() -> Self {
        Self {
            ch: b'~',
            len: 2,
            allow_longer: false,
        }
    }

    /// Check the opener at `pos`: the byte after it must not be whitespace,
    /// and `_` may not open inside a word.
    pub fn can_open(&self, text: &[u8], pos: usize, end: usize, previous: Option<u8>) -> bool {
        let after = pos + self.len;
        if after >= end || is_space(text[after]) {
            return false;
        }
        !(self.ch == b'_' && previous.is_some_and(is_word))
    }

    /// Build the run this delimiter encloses.
    pub fn wrap(&self, inner: Vec<InlineRun>) -> InlineRun {
        match (self.ch, self.len) {
            (b'~', _) => InlineRun::Strikethrough(inner),
            (_, 2) => InlineRun::Bold(inner),
            _ => InlineRun::Italic(inner),
        }
    }

    /// Index of this delimiter in per-delimiter tables.
    pub fn slot(&self) -> usize {
        match (self.ch, self.len) {
            (b'*', 1) => 0,
            (b'*', _) => 1,
            (b'_', 1) => 2,
            (b'_', _) => 3,
            _ => 4,
        }
    }
}

/// Find the start of the closer for an opener whose content begins at `from`.
///
/// Nested code spans and links are looked up through `memo`; callers go
/// through [`SearchMemo::closer`] so failed searches are remembered too.
pub fn find_closer(
    text: &[u8],
    from: usize,
    end: usize,
    delim: Delimiter,
    memo: &mut SearchMemo,
) -> Option<usize> {
    let mut pos = from;
    while pos < end {
        let b = text[pos];

        if b == b'\\' && pos + 1 < end && is_escapable(text[pos + 1]) {
            pos += 2;
            continue;
        }

        if b == b'`' {
            let ticks = code_span::run_length(text, pos, end, b'`');
            pos = match memo.code_closer(text, pos + ticks, end, ticks) {
                Some(close) => close + ticks,
                None => pos + ticks,
            };
            continue;
        }

        if b == b'[' {
            pos = link::match_link(text, pos, end, memo).map_or(pos + 1, |link| link.end);
            continue;
        }

        if b != delim.ch {
            pos += 1;
            continue;
        }

        let run = code_span::run_length(text, pos, end, delim.ch);
        let run_end = pos + run;
        // A run glued to the opener is part of the opener, not a closer.
        let glued = pos == from && from > 0 && text[from - 1] == delim.ch;
        let fits = run == delim.len || (delim.allow_longer && run >= 3 && run > delim.len);

        if !glued && fits {
            let close = run_end - delim.len;
            if close > from && !is_space(text[close - 1]) && closes_word(text, run_end, delim) {
                return Some(close);
            }
        }
        pos = run_end;
    }
    None
}

fn closes_word(text: &[u8], run_end: usize, delim: Delimiter) -> bool {
    delim.ch != b'_' || !text.get(run_end).copied().is_some_and(is_word)
}

#[inline]
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Alphanumeric, counting every non-ASCII byte as a word byte.
#[inline]
pub(crate) fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b >= 0x80
}

//! Outcomes of forward searches within one inline span.
//!
//! Every closer search walks right from a start offset to the end of the
//! span. When it finds nothing from `from`, it finds nothing from any later
//! start either, so later openers of the same kind give up at once. This keeps
//! a line full of unclosed openers linear.

use super::code_span;
use super::delim::{self, Delimiter};
use super::link;

/// Cached outcome of one kind of search.
#[derive(Debug, Default, Clone, Copy)]
struct Seen {
    /// Earliest start offset that found nothing.
    failed: Option<usize>,
    /// Last hit as `(from, found)`. Only kept for searches that stop at the
    /// first matching byte, where any later start up to `found` stops there too.
    hit: Option<(usize, usize)>,
}

impl Seen {
    fn lookup(&self, from: usize) -> Option<Option<usize>> {
        if self.failed.is_some_and(|failed| from >= failed) {
            return Some(None);
        }
        match self.hit {
            Some((start, found)) if (start..=found).contains(&from) => Some(Some(found)),
            _ => None,
        }
    }

    fn fail(&mut self, from: usize) {
        if self.failed.is_none_or(|failed| from < failed) {
            self.failed = Some(from);
        }
    }

    fn record(&mut self, from: usize, found: Option<usize>) {
        match found {
            Some(found) => self.hit = Some((from, found)),
            None => self.fail(from),
        }
    }
}

/// Search memo, created fresh for every span the scanner descends into.
#[derive(Debug, Default)]
pub struct SearchMemo {
    /// Indexed by [`Delimiter::slot`].
    closers: [Seen; Delimiter::SLOTS],
    /// Indexed by backtick run length.
    code: Vec<Seen>,
    label: Seen,
    destination: Seen,
    title: Seen,
}

impl SearchMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of the closer for `delim`, searching `text[from..end]`.
    pub fn closer(
        &mut self,
        text: &[u8],
        from: usize,
        end: usize,
        delim: Delimiter,
    ) -> Option<usize> {
        let slot = delim.slot();
        if self.closers[slot].lookup(from).is_some() {
            return None;
        }
        let found = delim::find_closer(text, from, end, delim, self);
        if found.is_none() {
            self.closers[slot].fail(from);
        }
        found
    }

    /// Start of a closing run of exactly `len` backticks.
    pub fn code_closer(
        &mut self,
        text: &[u8],
        from: usize,
        end: usize,
        len: usize,
    ) -> Option<usize> {
        if let Some(known) = self.code.get(len).and_then(|seen| seen.lookup(from)) {
            return known;
        }
        let found = code_span::find_closer(text, from, end, len);
        if self.code.len() <= len {
            self.code.resize(len + 1, Seen::default());
        }
        self.code[len].record(from, found);
        found
    }

    /// Offset of the first bracket after the start of a link label.
    pub fn label_end(&mut self, text: &[u8], from: usize, end: usize) -> Option<usize> {
        if let Some(known) = self.label.lookup(from) {
            return known;
        }
        let found = link::find_bracket(text, from, end, self);
        self.label.record(from, found);
        found
    }

    /// Offset of the first space, tab or `)` at or after `from`.
    pub fn destination_end(&mut self, text: &[u8], from: usize, end: usize) -> Option<usize> {
        if let Some(known) = self.destination.lookup(from) {
            return known;
        }
        let found = memchr::memchr3(b' ', b'\t', b')', &text[from..end]).map(|p| from + p);
        self.destination.record(from, found);
        found
    }

    /// Offset of the `"` closing a link title that starts at `from`.
    pub fn title_end(&mut self, text: &[u8], from: usize, end: usize) -> Option<usize> {
        if let Some(known) = self.title.lookup(from) {
            return known;
        }
        let found = memchr::memchr(b'"', &text[from..end]).map(|p| from + p);
        self.title.record(from, found);
        found
    }
}

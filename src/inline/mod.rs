//! Inline scanner for Markdown.
//!
//! Works on one line at a time, already isolated by the block scanner.
//! Recursive descent: an opener is matched with its closer first, then the
//! text between them is scanned again as a nested run sequence. Markers
//! without a closer stay in the output as literal text.

mod code_span;
mod delim;
mod link;
mod memo;
pub mod run;

pub use run::{plain_text, InlineRun};

pub(crate) use delim::is_word;

use crate::cursor::Cursor;
use crate::escape::{find_inline_special, is_escapable};
use crate::limits::MAX_INLINE_NESTING;
use crate::Options;
use delim::Delimiter;
use link::LinkSpan;
use memo::SearchMemo;
use run::RunBuilder;

/// Inline scanner.
#[derive(Debug, Clone, Copy)]
pub struct InlineScanner {
    strikethrough: bool,
}

impl Default for InlineScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl InlineScanner {
    /// Create a scanner with default options.
    pub fn new() -> Self {
        Self::with_options(&Options::default())
    }

    /// Create a scanner honoring `options`.
    pub fn with_options(options: &Options) -> Self {
        Self {
            strikethrough: options.strikethrough,
        }
    }

    /// Scan one line of text (no newline) into inline runs.
    ///
    /// # Example
    /// ```
    /// use mdscan::inline::{InlineRun, InlineScanner};
    ///
    /// let runs = InlineScanner::new().scan("**bold** text");
    /// assert_eq!(runs[0], InlineRun::Bold(vec![InlineRun::plain("bold")]));
    /// assert_eq!(runs[1], InlineRun::plain(" text"));
    /// ```
    pub fn scan(&self, line: &str) -> Vec<InlineRun> {
        self.scan_span(line, 0, line.len(), 0)
    }

    /// Scan `text[start..end]`. Bytes outside the span are still visible as
    /// lookbehind/lookahead context for flanking checks.
    fn scan_span(&self, text: &str, start: usize, end: usize, depth: usize) -> Vec<InlineRun> {
        let mut out = RunBuilder::new();
        if depth >= MAX_INLINE_NESTING {
            out.push_str(&text[start..end]);
            return out.finish();
        }

        let bytes = text.as_bytes();
        let mut cursor = Cursor::new_at(&bytes[..end], start);
        let mut memo = SearchMemo::new();

        while !cursor.is_eof() {
            let pos = cursor.offset();
            match cursor.current() {
                b'\\' => {
                    let next = cursor.peek(1);
                    if pos + 1 < end && is_escapable(next) {
                        out.push_char(next as char);
                        cursor.advance_by(2);
                    } else {
                        out.push_char('\\');
                        cursor.advance();
                    }
                }
                b'`' => {
                    let ticks = cursor.run_length(b'`');
                    match memo.code_closer(bytes, pos + ticks, end, ticks) {
                        Some(close) => {
                            let code = &text[pos + ticks..close];
                            out.push_run(InlineRun::InlineCode(code.to_string()));
                            cursor.advance_by(close + ticks - pos);
                        }
                        None => {
                            out.push_str(&text[pos..pos + ticks]);
                            cursor.advance_by(ticks);
                        }
                    }
                }
                ch @ (b'*' | b'_' | b'~') if ch != b'~' || self.strikethrough => {
                    let run = cursor.run_length(ch);
                    let matched = if ch == b'~' {
                        strikethrough_opener(bytes, &cursor, end, run, &mut memo)
                    } else {
                        emphasis_opener(bytes, &cursor, end, run, &mut memo)
                    };
                    match matched {
                        Some((delim, close)) => {
                            let inner = self.scan_span(text, pos + delim.len, close, depth + 1);
                            out.push_run(delim.wrap(inner));
                            cursor.advance_by(close + delim.len - pos);
                        }
                        None => {
                            out.push_str(&text[pos..pos + run]);
                            cursor.advance_by(run);
                        }
                    }
                }
                b'[' => match link::match_link(bytes, pos, end, &mut memo) {
                    Some(span) => {
                        let label = (span.label_start, span.label_end);
                        out.push_run(InlineRun::Link {
                            text: self.scan_span(text, label.0, label.1, depth + 1),
                            url: span_text(text, span.url_start, span.url_end),
                        });
                        cursor.advance_by(span.end - pos);
                    }
                    None => {
                        out.push_char('[');
                        cursor.advance();
                    }
                },
                b'!' => {
                    let image = if cursor.peek(1) == b'[' {
                        link::match_link(bytes, pos + 1, end, &mut memo)
                    } else {
                        None
                    };
                    match image {
                        Some(span) => {
                            out.push_run(self.image(text, &span, depth));
                            cursor.advance_by(span.end - pos);
                        }
                        None => {
                            out.push_char('!');
                            cursor.advance();
                        }
                    }
                }
                _ => {
                    // Plain text up to the next byte that may start markup.
                    let rest = &bytes[pos + 1..end];
                    let len = find_inline_special(rest).map_or(rest.len(), |p| p) + 1;
                    out.push_str(&text[pos..pos + len]);
                    cursor.advance_by(len);
                }
            }
        }

        out.finish()
    }

    fn image(&self, text: &str, span: &LinkSpan, depth: usize) -> InlineRun {
        let alt = self.scan_span(text, span.label_start, span.label_end, depth + 1);
        InlineRun::Image {
            alt: plain_text(&alt),
            url: span_text(text, span.url_start, span.url_end),
            title: span.title.map(|(start, end)| span_text(text, start, end)),
        }
    }
}

fn span_text(text: &str, start: usize, end: usize) -> String {
    text[start..end].to_string()
}

/// Match the delimiter opened by a run of `run` `*` or `_` at the cursor,
/// returning it with the start of its closer.
///
/// A run of three or more may open bold or italic. The one that closes later
/// is the outer run; on a shared closing run (`***a***`) bold wins.
fn emphasis_opener(
    text: &[u8],
    cursor: &Cursor<'_>,
    end: usize,
    run: usize,
    memo: &mut SearchMemo,
) -> Option<(Delimiter, usize)> {
    let ch = cursor.current();
    let bold = Delimiter::bold(ch);
    let italic = Delimiter::italic(ch);
    match run {
        1 => open(text, cursor, end, italic, memo),
        2 => open(text, cursor, end, bold, memo),
        _ => {
            let as_bold = open(text, cursor, end, bold, memo);
            let as_italic = open(text, cursor, end, italic, memo);
            match (as_bold, as_italic) {
                (Some((_, b)), Some((_, i))) if i > b + 1 => as_italic,
                (Some(_), _) => as_bold,
                (None, _) => as_italic,
            }
        }
    }
}

/// Only a run of exactly two tildes opens strikethrough.
fn strikethrough_opener(
    text: &[u8],
    cursor: &Cursor<'_>,
    end: usize,
    run: usize,
    memo: &mut SearchMemo,
) -> Option<(Delimiter, usize)> {
    let delim = Delimiter::strikethrough();
    if run != delim.len {
        return None;
    }
    open(text, cursor, end, delim, memo)
}

fn open(
    text: &[u8],
    cursor: &Cursor<'_>,
    end: usize,
    delim: Delimiter,
    memo: &mut SearchMemo,
) -> Option<(Delimiter, usize)> {
    let pos = cursor.offset();
    if !delim.can_open(text, pos, end, cursor.previous()) {
        return None;
    }
    let close = memo.closer(text, pos + delim.len, end, delim)?;
    Some((delim, close))
}

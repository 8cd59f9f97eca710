//! Link and image matching.
//!
//! Handles:
//! - Inline links: `[text](url)`
//! - Images: `![alt](url "title")`
//!
//! The label ends at the first unescaped `]` outside a code span and must be
//! followed directly by `(`. A `[` inside the label means the link starts
//! later, so labels never nest. The destination runs to the first space, tab or
//! `)`. An optional double-quoted title may follow it.

use super::code_span;
use super::memo::SearchMemo;
use crate::escape::is_escapable;

/// Byte offsets of a matched link within the scanned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSpan {
    /// Start of the label (after `[`).
    pub label_start: usize,
    /// Position of the closing `]`.
    pub label_end: usize,
    pub url_start: usize,
    pub url_end: usize,
    /// Title contents between the quotes.
    pub title: Option<(usize, usize)>,
    /// End of the entire link (after the closing `)`).
    pub end: usize,
}

/// Match a link whose `[` is at `open`, bounded by `end`.
pub fn match_link(text: &[u8], open: usize, end: usize, memo: &mut SearchMemo) -> Option<LinkSpan> {
    let label_start = open + 1;
    let label_end = memo.label_end(text, label_start, end)?;
    if text[label_end] != b']' || label_end + 1 >= end || text[label_end + 1] != b'(' {
        return None;
    }

    let url_start = skip_spaces(text, label_end + 2, end);
    let url_end = memo.destination_end(text, url_start, end)?;
    let mut pos = skip_spaces(text, url_end, end);

    let mut title = None;
    if pos < end && text[pos] == b'"' {
        let title_end = memo.title_end(text, pos + 1, end)?;
        title = Some((pos + 1, title_end));
        pos = skip_spaces(text, title_end + 1, end);
    }

    if pos >= end || text[pos] != b')' {
        return None;
    }
    Some(LinkSpan {
        label_start,
        label_end,
        url_start,
        url_end,
        title,
        end: pos + 1,
    })
}

/// Find the first unescaped `[` or `]` outside a code span.
pub fn find_bracket(
    text: &[u8],
    from: usize,
    end: usize,
    memo: &mut SearchMemo,
) -> Option<usize> {
    let mut pos = from;
    while pos < end {
        match text[pos] {
            b'\\' if pos + 1 < end && is_escapable(text[pos + 1]) => pos += 2,
            b'`' => {
                let ticks = code_span::run_length(text, pos, end, b'`');
                pos = memo
                    .code_closer(text, pos + ticks, end, ticks)
                    .map_or(pos + ticks, |close| close + ticks);
            }
            b'[' | b']' => return Some(pos),
            _ => pos += 1,
        }
    }
    None
}

fn skip_spaces(text: &[u8], mut pos: usize, end: usize) -> usize {
    while pos < end && matches!(text[pos], b' ' | b'\t') {
        pos += 1;
    }
    pos
}

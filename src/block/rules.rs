//! Line classification.
//!
//! The same leading byte can start a bullet, a horizontal rule or emphasis,
//! so classification is a priority-ordered table of small predicates. Each
//! predicate looks at the cursor (positioned after the indentation) with
//! bounded lookahead and never moves it.

use crate::cursor::Cursor;
use crate::limits::{CODE_FENCE_LEN, MAX_HEADING_LEVEL, MAX_LIST_MARKER_DIGITS, MIN_RULE_RUN};
use crate::Options;

/// State carried between lines that affects classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineContext {
    /// The previous line was blank.
    pub prev_blank: bool,
    pub options: Options,
}

/// What a line starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// `marker_len` is the number of `#` bytes.
    Heading { level: u8, marker_len: usize },
    HorizontalRule,
    Checklist { checked: bool },
    Bullet,
    /// `digits` is the length of the number before the `.`.
    NumberedBullet { digits: usize },
    CodeFence,
    /// This line is the heading text, the next line is the underline.
    UnderlinedHeading,
    Text,
}

impl LineKind {
    /// True for lines that become their own block (and so may carry an indent).
    pub fn is_structural(self) -> bool {
        !matches!(self, LineKind::Blank | LineKind::Text)
    }
}

type Predicate = fn(&Cursor<'_>, &LineContext) -> Option<LineKind>;

/// Dispatch table, highest priority first. Lines matching nothing are text.
const DISPATCH: &[(&str, Predicate)] = &[
    ("blank", blank),
    ("heading", heading),
    ("horizontal-rule", horizontal_rule),
    ("list-item", list_item),
    ("numbered-bullet", numbered_bullet),
    ("code-fence", code_fence),
    ("underlined-heading", underlined_heading),
];

/// Classify the line at the cursor.
pub fn classify(cursor: &Cursor<'_>, ctx: &LineContext) -> LineKind {
    DISPATCH
        .iter()
        .find_map(|(_, predicate)| predicate(cursor, ctx))
        .unwrap_or(LineKind::Text)
}

fn blank(cursor: &Cursor<'_>, _ctx: &LineContext) -> Option<LineKind> {
    cursor
        .rest_of_line()
        .is_blank(cursor.input())
        .then_some(LineKind::Blank)
}

fn heading(cursor: &Cursor<'_>, _ctx: &LineContext) -> Option<LineKind> {
    if cursor.current() != b'#' {
        return None;
    }
    let marker_len = cursor.run_length(b'#');
    let level = marker_len.min(MAX_HEADING_LEVEL as usize) as u8;
    Some(LineKind::Heading { level, marker_len })
}

/// `---`, `___` or `***` alone on a line, directly after a blank line.
fn horizontal_rule(cursor: &Cursor<'_>, ctx: &LineContext) -> Option<LineKind> {
    let marker = cursor.current();
    if !matches!(marker, b'-' | b'_' | b'*') || !ctx.prev_blank {
        return None;
    }
    let run = cursor.run_length(marker);
    let line = cursor.rest_of_line().trim_end(cursor.input());
    (run >= MIN_RULE_RUN && line.len() == run).then_some(LineKind::HorizontalRule)
}

/// `-`, `+` or `*` followed by a space; a checklist when `[x]`/`[ ]` follows.
fn list_item(cursor: &Cursor<'_>, ctx: &LineContext) -> Option<LineKind> {
    if !matches!(cursor.current(), b'-' | b'+' | b'*') || cursor.peek(1) != b' ' {
        return None;
    }
    if ctx.options.task_lists {
        if let Some(checked) = task_marker(cursor, ctx) {
            return Some(LineKind::Checklist { checked });
        }
    }
    Some(LineKind::Bullet)
}

/// Checklist box two bytes past the bullet: `[`, state byte, `]`, then a
/// space or end of line.
fn task_marker(cursor: &Cursor<'_>, ctx: &LineContext) -> Option<bool> {
    if cursor.peek(2) != b'[' || cursor.peek(4) != b']' {
        return None;
    }
    if !matches!(cursor.peek(5), b' ' | b'\n' | b'\r') {
        return None;
    }
    match cursor.peek(3) {
        b'x' => Some(true),
        b'X' if ctx.options.uppercase_task_marker => Some(true),
        b' ' => Some(false),
        _ => None,
    }
}

fn numbered_bullet(cursor: &Cursor<'_>, _ctx: &LineContext) -> Option<LineKind> {
    let digits = (0..=MAX_LIST_MARKER_DIGITS)
        .take_while(|&i| cursor.peek(i).is_ascii_digit())
        .count();
    if digits == 0 || digits > MAX_LIST_MARKER_DIGITS {
        return None;
    }
    (cursor.peek(digits) == b'.' && cursor.peek(digits + 1) == b' ')
        .then_some(LineKind::NumberedBullet { digits })
}

/// Exactly three backticks open a code block.
fn code_fence(cursor: &Cursor<'_>, _ctx: &LineContext) -> Option<LineKind> {
    (cursor.run_length(b'`') == CODE_FENCE_LEN).then_some(LineKind::CodeFence)
}

fn underlined_heading(cursor: &Cursor<'_>, _ctx: &LineContext) -> Option<LineKind> {
    let next = cursor.next_line()?;
    is_underline(next.slice(cursor.input())).then_some(LineKind::UnderlinedHeading)
}

/// A full line of 3+ `-` or 3+ `=` (trailing whitespace allowed).
pub fn is_underline(line: &[u8]) -> bool {
    let end = line
        .iter()
        .rposition(|&b| b != b' ' && b != b'\t')
        .map_or(0, |p| p + 1);
    let line = &line[..end];
    match line.first() {
        Some(&marker @ (b'-' | b'=')) => {
            line.len() >= MIN_RULE_RUN && line.iter().all(|&b| b == marker)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_with(line: &str, prev_blank: bool, options: Options) -> LineKind {
        let cursor = Cursor::new(line.as_bytes());
        classify(&cursor, &LineContext { prev_blank, options })
    }

    fn kind(line: &str) -> LineKind {
        kind_with(line, false, Options::default())
    }

    #[test]
    fn test_blank() {
        assert_eq!(kind(""), LineKind::Blank);
        assert_eq!(kind("\n"), LineKind::Blank);
        assert_eq!(kind(" \t\r\nnext"), LineKind::Blank);
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(
            kind("# Title"),
            LineKind::Heading {
                level: 1,
                marker_len: 1
            }
        );
        assert_eq!(
            kind("######## deep"),
            LineKind::Heading {
                level: 6,
                marker_len: 8
            }
        );
    }

    #[test]
    fn test_horizontal_rule_needs_blank_before() {
        assert_eq!(kind_with("---", true, Options::default()), LineKind::HorizontalRule);
        assert_eq!(kind_with("___", true, Options::default()), LineKind::HorizontalRule);
        assert_eq!(kind_with("*****", true, Options::default()), LineKind::HorizontalRule);
        assert_eq!(kind_with("---  ", true, Options::default()), LineKind::HorizontalRule);
        assert_eq!(kind("---"), LineKind::Text);
        assert_eq!(kind_with("--", true, Options::default()), LineKind::Text);
        assert_eq!(kind_with("---x", true, Options::default()), LineKind::Text);
        assert_eq!(kind_with("-*-", true, Options::default()), LineKind::Text);
    }

    #[test]
    fn test_bullets() {
        assert_eq!(kind("- item"), LineKind::Bullet);
        assert_eq!(kind("+ item"), LineKind::Bullet);
        assert_eq!(kind("* item"), LineKind::Bullet);
        assert_eq!(kind("-item"), LineKind::Text);
        assert_eq!(kind("*emphasis*"), LineKind::Text);
    }

    #[test]
    fn test_checklist() {
        assert_eq!(kind("- [x] done"), LineKind::Checklist { checked: true });
        assert_eq!(kind("- [X] done"), LineKind::Checklist { checked: true });
        assert_eq!(kind("- [ ] todo"), LineKind::Checklist { checked: false });
        assert_eq!(kind("- [ ]"), LineKind::Checklist { checked: false });
        assert_eq!(kind("- [a] nope"), LineKind::Bullet);
        assert_eq!(kind("- [ ]nospace"), LineKind::Bullet);
    }

    #[test]
    fn test_checklist_options() {
        let no_tasks = Options {
            task_lists: false,
            ..Options::default()
        };
        assert_eq!(kind_with("- [x] done", false, no_tasks), LineKind::Bullet);

        let lower_only = Options {
            uppercase_task_marker: false,
            ..Options::default()
        };
        assert_eq!(kind_with("- [X] done", false, lower_only), LineKind::Bullet);
    }

    #[test]
    fn test_numbered_bullet() {
        assert_eq!(kind("1. one"), LineKind::NumberedBullet { digits: 1 });
        assert_eq!(kind("42. answer"), LineKind::NumberedBullet { digits: 2 });
        assert_eq!(kind("1.no space"), LineKind::Text);
        assert_eq!(kind("1) paren"), LineKind::Text);
        assert_eq!(kind("1234567890. too long"), LineKind::Text);
    }

    #[test]
    fn test_code_fence() {
        assert_eq!(kind("```"), LineKind::CodeFence);
        assert_eq!(kind("```rust"), LineKind::CodeFence);
        assert_eq!(kind("``"), LineKind::Text);
        assert_eq!(kind("````"), LineKind::Text);
    }

    #[test]
    fn test_underlined_heading() {
        assert_eq!(kind("Text\n---"), LineKind::UnderlinedHeading);
        assert_eq!(kind("Text\n===\n"), LineKind::UnderlinedHeading);
        assert_eq!(kind("Text\n--"), LineKind::Text);
        assert_eq!(kind("Text\n- item"), LineKind::Text);
        assert_eq!(kind("Text"), LineKind::Text);
    }

    #[test]
    fn test_heading_beats_underline() {
        assert!(matches!(kind("# Title\n==="), LineKind::Heading { .. }));
    }

    #[test]
    fn test_is_underline() {
        assert!(is_underline(b"---"));
        assert!(is_underline(b"=====  "));
        assert!(!is_underline(b"-=-"));
        assert!(!is_underline(b"***"));
        assert!(!is_underline(b""));
    }

    #[test]
    fn test_structural() {
        assert!(LineKind::Bullet.is_structural());
        assert!(!LineKind::Text.is_structural());
        assert!(!LineKind::Blank.is_structural());
    }
}

//! Markdown serializer.
//!
//! Writes a [`Document`] back as canonical Markdown: `#` headings, `===`
//! underlines, `- ` bullets, `1. ` numbered bullets and fenced code. Parsing
//! the output again yields the same document for everything the scanner
//! produces unambiguously.
//!
//! Emphasis is written with `*` unless that would put two emphasis markers
//! of the same character side by side, or nest italic in italic with one
//! character. Then `_` is used where the word rules allow it.

use crate::document::{Block, CodeLine, Document};
use crate::escape::{escape_markdown_into, is_escapable};
use crate::inline::{is_word, InlineRun};

/// Serialize a document to Markdown.
///
/// # Example
/// ```
/// let doc = mdscan::parse("Title\n---\n* item").unwrap();
/// assert_eq!(mdscan::to_markdown(&doc), "Title\n===\n\n- item\n");
/// ```
pub fn to_markdown(doc: &Document) -> String {
    let mut out = String::new();
    let mut indent = 0;
    let mut first = true;

    for block in doc {
        match block {
            Block::Indent { level } => {
                indent = *level;
                continue;
            }
            Block::EndOfFile => break,
            _ => {}
        }

        // A rule is only recognized after a blank line.
        if !first || matches!(block, Block::HorizontalRule) {
            out.push('\n');
        }
        first = false;

        for _ in 0..std::mem::take(&mut indent) {
            out.push(' ');
        }
        write_block(&mut out, block);
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { level, content } => {
            for _ in 0..*level {
                out.push('#');
            }
            out.push(' ');
            out.push_str(content);
            out.push('\n');
        }
        Block::UnderlinedHeading { content } => {
            out.push_str(content);
            out.push_str("\n===\n");
        }
        Block::Bullet { content } => write_item(out, "- ", content),
        Block::NumberedBullet { content } => write_item(out, "1. ", content),
        Block::Checklist { checked, content } => {
            let marker = if *checked { "- [x] " } else { "- [ ] " };
            write_item(out, marker, content);
        }
        Block::CodeBlock { language, lines } => {
            out.push_str("```");
            out.push_str(language);
            out.push('\n');
            for line in lines {
                if let CodeLine::PlainLine(text) = line {
                    out.push_str(text);
                }
                out.push('\n');
            }
            out.push_str("```\n");
        }
        Block::HorizontalRule => out.push_str("---\n"),
        Block::Paragraph { lines } => {
            for line in lines {
                write_runs(out, line);
                out.push('\n');
            }
        }
        Block::Indent { .. } | Block::EndOfFile => {}
    }
}

fn write_item(out: &mut String, marker: &str, content: &[InlineRun]) {
    out.push_str(marker);
    write_runs(out, content);
    out.push('\n');
}

/// Serialize inline runs, escaping literal text so it stays literal.
pub fn write_runs(out: &mut String, runs: &[InlineRun]) {
    write_nested(out, runs, None);
}

/// Write `runs` followed by `closer`, the enclosing run's closing byte.
fn write_nested(out: &mut String, runs: &[InlineRun], closer: Option<u8>) {
    for (i, run) in runs.iter().enumerate() {
        match run {
            InlineRun::PlainText(text) => escape_markdown_into(out, text),
            InlineRun::Bold(children) | InlineRun::Italic(children) => {
                let underscore = prefers_underscore(out, runs.get(i + 1), closer);
                let marker = match (run, underscore) {
                    (InlineRun::Bold(_), false) => "**",
                    (InlineRun::Bold(_), true) => "__",
                    (_, false) => "*",
                    (_, true) => "_",
                };
                write_wrapped(out, marker, children);
            }
            InlineRun::Strikethrough(children) => write_wrapped(out, "~~", children),
            InlineRun::InlineCode(code) => {
                let fence = "`".repeat(longest_backtick_run(code) + 1);
                out.push_str(&fence);
                out.push_str(code);
                out.push_str(&fence);
            }
            InlineRun::Link { text, url } => {
                out.push('[');
                write_nested(out, text, Some(b']'));
                out.push_str("](");
                out.push_str(url);
                out.push(')');
            }
            InlineRun::Image { alt, url, title } => {
                out.push_str("![");
                escape_markdown_into(out, alt);
                out.push_str("](");
                out.push_str(url);
                if let Some(title) = title {
                    out.push_str(" \"");
                    out.push_str(title);
                    out.push('"');
                }
                out.push(')');
            }
        }
    }
}

fn write_wrapped(out: &mut String, marker: &str, children: &[InlineRun]) {
    out.push_str(marker);
    write_nested(out, children, marker.bytes().next());
    out.push_str(marker);
}

/// Whether the next emphasis run should use `_` rather than `*`.
///
/// `_` only opens after a non-word byte and only closes before one, and it
/// must not touch another `_`.
fn prefers_underscore(out: &str, next: Option<&InlineRun>, closer: Option<u8>) -> bool {
    let prev = out.as_bytes().last().copied();
    let next_emphasis = matches!(next, Some(InlineRun::Bold(_) | InlineRun::Italic(_)));
    let next_byte = match next {
        Some(run) => first_byte(run),
        None => closer,
    };

    let avoid_star =
        closer == Some(b'*') || prev == Some(b'*') || next_byte == Some(b'*') || next_emphasis;
    let underscore_fits = prev != Some(b'_')
        && next_byte != Some(b'_')
        && !prev.is_some_and(is_word)
        && !next_byte.is_some_and(is_word);
    avoid_star && underscore_fits
}

/// First byte `run` serializes to, or `None` for emphasis, whose marker
/// is still to be chosen.
fn first_byte(run: &InlineRun) -> Option<u8> {
    match run {
        InlineRun::PlainText(text) => text
            .bytes()
            .next()
            .map(|b| if is_escapable(b) { b'\\' } else { b }),
        InlineRun::InlineCode(_) => Some(b'`'),
        InlineRun::Strikethrough(_) => Some(b'~'),
        InlineRun::Link { .. } => Some(b'['),
        InlineRun::Image { .. } => Some(b'!'),
        InlineRun::Bold(_) | InlineRun::Italic(_) => None,
    }
}

fn longest_backtick_run(text: &str) -> usize {
    text.split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn roundtrip(input: &str) -> String {
        to_markdown(&parse(input).unwrap())
    }

    #[test]
    fn test_empty() {
        assert_eq!(roundtrip(""), "");
    }

    #[test]
    fn test_canonical_markers() {
        assert_eq!(
            roundtrip("## Sub\n+ a\n* b\n42. c\n- [X] d"),
            "## Sub\n\n- a\n\n- b\n\n1. c\n\n- [x] d\n"
        );
    }

    #[test]
    fn test_indent_written_before_block() {
        assert_eq!(roundtrip("- a\n    - b"), "- a\n\n    - b\n");
    }

    #[test]
    fn test_rule_at_start_gets_blank_line() {
        assert_eq!(roundtrip("\n***\n"), "\n---\n");
    }

    #[test]
    fn test_code_block() {
        assert_eq!(
            roundtrip("```sh\necho *hi*\n\n```\n"),
            "```sh\necho *hi*\n\n```\n"
        );
    }

    #[test]
    fn test_plain_text_escaped() {
        assert_eq!(roundtrip("snake_case \\*x\\*"), "snake\\_case \\*x\\*\n");
    }

    #[test]
    fn test_inline_runs() {
        assert_eq!(
            roundtrip("__b__ _i_ ~~s~~ ``a ` b``"),
            "**b** *i* ~~s~~ ``a ` b``\n"
        );
    }

    #[test]
    fn test_same_character_nesting_alternates() {
        assert_eq!(roundtrip("*__a__ b*"), "*__a__ b*\n");
        assert_eq!(roundtrip("***a***"), "**_a_**\n");
        assert_eq!(roundtrip("_a *b* c_"), "*a _b_ c*\n");
        assert_eq!(roundtrip("**b *it* c**"), "**b _it_ c**\n");
    }

    #[test]
    fn test_underscore_needs_word_boundary() {
        // `__b__x` would not close, so bold keeps `*`.
        assert_eq!(roundtrip("_a_**b**x"), "_a_**b**x\n");
    }

    #[test]
    fn test_links_and_images() {
        assert_eq!(
            roundtrip(r#"[the *docs*](https://x.org) ![logo](l.png "Logo")"#),
            "[the *docs*](https://x.org) ![logo](l.png \"Logo\")\n"
        );
        assert_eq!(roundtrip("[a] (b)"), "\\[a\\] \\(b\\)\n");
    }

    #[test]
    fn test_longest_backtick_run() {
        assert_eq!(longest_backtick_run("plain"), 0);
        assert_eq!(longest_backtick_run("a ` b `` c"), 2);
    }

    #[test]
    fn test_output_reparses_identically() {
        let input = "Intro *one*\nline two\n\n- [ ] task\n  1. nested\n\n---\n\nEnd\n===\n";
        let first = parse(input).unwrap();
        let second = parse(&to_markdown(&first)).unwrap();
        assert_eq!(first, second);
    }
}

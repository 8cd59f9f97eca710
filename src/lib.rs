//! mdscan: single-pass Markdown scanner
//!
//! This crate turns Markdown text into a flat, ordered document model: a list
//! of blocks (headings, list items, code blocks, paragraphs, ...) whose text is
//! further split into inline runs (bold, italic, inline code, ...).
//!
//! # Design Principles
//! - One pass over the input, line by line, with bounded lookahead
//! - No regex: pure byte-level scanning
//! - Malformed markup degrades to plain text; only an unclosed or badly
//!   closed code block is an error
//! - Nesting depth is bounded (see [`limits`])
//!
//! The model can be rendered to HTML ([`render`]) or written back as
//! canonical Markdown ([`markdown`]).

pub mod block;
pub mod cursor;
pub mod document;
pub mod error;
pub mod escape;
pub mod inline;
pub mod limits;
pub mod markdown;
pub mod range;
pub mod render;

// Re-export primary types
pub use block::BlockScanner;
pub use document::{Block, CodeLine, Document};
pub use error::{ConvertError, ParseError, Result};
pub use inline::{InlineRun, InlineScanner};
pub use markdown::to_markdown;
pub use range::Range;
pub use render::{HtmlWriter, RenderOptions};

/// Parsing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Recognize `- [x]` / `- [ ]` as checklist items.
    pub task_lists: bool,
    /// Recognize `~~text~~` as strikethrough.
    pub strikethrough: bool,
    /// Accept `[X]` as a checked box as well as `[x]`.
    pub uppercase_task_marker: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            task_lists: true,
            strikethrough: true,
            uppercase_task_marker: true,
        }
    }
}

/// Parse Markdown into a [`Document`].
///
/// # Errors
/// Fails on a code block that is never closed or closed with the wrong
/// number of backticks, and on input longer than [`limits::MAX_INPUT_LEN`]
/// (4 GiB), whose offsets would not fit in a [`Range`].
///
/// # Example
/// ```
/// use mdscan::Block;
///
/// let doc = mdscan::parse("# Hello\n\nWorld").unwrap();
/// assert_eq!(
///     doc.blocks()[0],
///     Block::Heading { level: 1, content: "Hello".into() }
/// );
/// assert_eq!(doc.blocks().last(), Some(&Block::EndOfFile));
/// ```
pub fn parse(input: &str) -> Result<Document> {
    parse_with_options(input, &Options::default())
}

/// Parse Markdown with options.
pub fn parse_with_options(input: &str, options: &Options) -> Result<Document> {
    log::debug!("parsing {} bytes with {:?}", input.len(), options);
    BlockScanner::with_options(input, *options).parse()
}

/// Convert Markdown to an HTML fragment.
///
/// # Example
/// ```
/// let html = mdscan::to_html("# Hello\n\nWorld").unwrap();
/// assert!(html.contains("<h1>Hello</h1>"));
/// assert!(html.contains("<p>World</p>"));
/// ```
pub fn to_html(input: &str) -> Result<String> {
    to_html_with_options(input, &Options::default(), &RenderOptions::default())
}

/// Convert Markdown to HTML with parse and render options.
pub fn to_html_with_options(
    input: &str,
    options: &Options,
    render_options: &RenderOptions,
) -> Result<String> {
    let doc = parse_with_options(input, options)?;
    let mut writer = HtmlWriter::with_capacity_for(input.len(), *render_options);
    writer.write_document(&doc);
    Ok(writer.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert!(options.task_lists);
        assert!(options.strikethrough);
        assert!(options.uppercase_task_marker);
    }

    #[test]
    fn test_parse_ends_with_eof() {
        let doc = parse("text").unwrap();
        assert_eq!(doc.blocks().last(), Some(&Block::EndOfFile));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_parse_error_surfaces() {
        assert_eq!(
            parse("```\nnever closed").unwrap_err(),
            ParseError::UnclosedCodeBlock { line: 1 }
        );
        assert!(to_html("```\nnever closed").is_err());
    }

    #[test]
    fn test_options_reach_inline_scanner() {
        let options = Options {
            strikethrough: false,
            ..Options::default()
        };
        let html = to_html_with_options("~~x~~", &options, &RenderOptions::default()).unwrap();
        assert_eq!(html, "<p>~~x~~</p>\n");
    }
}

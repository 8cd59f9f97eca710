//! HTML renderer for a parsed [`Document`].
//!
//! The document model is flat: list items are individual blocks and nesting
//! is expressed by [`Block::Indent`] markers. The writer regroups consecutive
//! items into `<ul>`/`<ol>` elements, opening a nested list when the indent
//! grows and closing back when it shrinks.

use crate::document::{Block, CodeLine, Document};
use crate::escape::{escape_attr_into, escape_html_into, escape_url_into};
use crate::inline::InlineRun;

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap the output in a minimal HTML page titled after the first heading.
    pub full_document: bool,
    /// Emit `class="language-…"` on `<code>` for fenced blocks with a language.
    pub code_language_class: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            full_document: false,
            code_language_class: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
    Checklist,
}

impl ListKind {
    fn of(block: &Block) -> Option<Self> {
        if !block.is_list_item() {
            return None;
        }
        Some(match block {
            Block::NumberedBullet { .. } => ListKind::Ordered,
            Block::Checklist { .. } => ListKind::Checklist,
            _ => ListKind::Unordered,
        })
    }

    fn open_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>\n",
            ListKind::Ordered => "<ol>\n",
            ListKind::Checklist => "<ul class=\"checklist\">\n",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "</ol>\n",
            ListKind::Unordered | ListKind::Checklist => "</ul>\n",
        }
    }
}

/// A list currently open in the output. Its last `<li>` is still open.
#[derive(Debug, Clone, Copy)]
struct OpenList {
    kind: ListKind,
    indent: usize,
}

/// HTML output writer.
///
/// # Example
/// ```
/// use mdscan::{HtmlWriter, RenderOptions};
///
/// let doc = mdscan::parse("- one\n- two").unwrap();
/// let mut writer = HtmlWriter::new(RenderOptions::default());
/// writer.write_document(&doc);
/// assert_eq!(writer.into_string(), "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n");
/// ```
pub struct HtmlWriter {
    out: String,
    options: RenderOptions,
    lists: Vec<OpenList>,
    /// Indent announced by the last `Indent` block, consumed by the next block.
    pending_indent: usize,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    pub fn new(options: RenderOptions) -> Self {
        Self::with_capacity(1024, options)
    }

    /// Create with pre-allocated capacity based on expected input size.
    ///
    /// Typical HTML is ~1.25x input size.
    pub fn with_capacity_for(input_len: usize, options: RenderOptions) -> Self {
        Self::with_capacity(input_len + input_len / 4, options)
    }

    /// Create with explicit capacity.
    pub fn with_capacity(capacity: usize, options: RenderOptions) -> Self {
        Self {
            out: String::with_capacity(capacity),
            options,
            lists: Vec::new(),
            pending_indent: 0,
        }
    }

    /// Write a string without escaping.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Write text with HTML escaping.
    #[inline]
    pub fn write_escaped_text(&mut self, text: &str) {
        escape_html_into(&mut self.out, text);
    }

    /// Render a whole document.
    pub fn write_document(&mut self, doc: &Document) {
        if self.options.full_document {
            let title = doc.headings().next().map_or("", |(_, text)| text);
            self.write_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>");
            self.write_escaped_text(title);
            self.write_str("</title>\n</head>\n<body>\n");
        }

        for block in doc {
            self.write_block(block);
        }
        self.close_lists_deeper_than(None);

        if self.options.full_document {
            self.write_str("</body>\n</html>\n");
        }
    }

    /// Render one block.
    pub fn write_block(&mut self, block: &Block) {
        if let Block::Indent { level } = block {
            self.pending_indent = *level;
            return;
        }
        let indent = std::mem::take(&mut self.pending_indent);

        if let Some(kind) = ListKind::of(block) {
            self.open_item(kind, indent);
        } else {
            self.close_lists_deeper_than(None);
        }

        match block {
            Block::Heading { level, content } => self.write_heading(*level, content),
            Block::UnderlinedHeading { content } => self.write_heading(2, content),
            Block::Bullet { content } | Block::NumberedBullet { content } => {
                self.write_runs(content);
            }
            Block::Checklist { checked, content } => {
                if *checked {
                    self.write_str("<input type=\"checkbox\" checked=\"\" disabled=\"\" /> ");
                } else {
                    self.write_str("<input type=\"checkbox\" disabled=\"\" /> ");
                }
                self.write_runs(content);
            }
            Block::CodeBlock { language, lines } => self.write_code_block(language, lines),
            Block::HorizontalRule => self.write_str("<hr />\n"),
            Block::Paragraph { lines } => {
                self.write_str("<p>");
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        self.write_str("\n");
                    }
                    self.write_runs(line);
                }
                self.write_str("</p>\n");
            }
            Block::Indent { .. } | Block::EndOfFile => {}
        }
    }

    /// Start a `<li>`, opening or closing lists so the item lands at `indent`.
    fn open_item(&mut self, kind: ListKind, indent: usize) {
        self.close_lists_deeper_than(Some(indent));

        match self.lists.last().copied() {
            Some(top) if top.indent == indent && top.kind == kind => {
                self.write_str("</li>\n");
            }
            Some(top) if top.indent == indent => {
                // Same depth, different list type: end the old list.
                self.close_top_list();
                self.start_list(kind, indent);
            }
            _ => self.start_list(kind, indent),
        }
        self.write_str("<li>");
    }

    fn start_list(&mut self, kind: ListKind, indent: usize) {
        if !self.lists.is_empty() {
            // Nested inside the parent's open item.
            self.write_str("\n");
        }
        self.write_str(kind.open_tag());
        self.lists.push(OpenList { kind, indent });
    }

    fn close_top_list(&mut self) {
        if let Some(list) = self.lists.pop() {
            self.write_str("</li>\n");
            self.write_str(list.kind.close_tag());
        }
    }

    /// Close lists nested deeper than `indent`, or all of them for `None`.
    fn close_lists_deeper_than(&mut self, indent: Option<usize>) {
        while let Some(top) = self.lists.last() {
            if indent.is_some_and(|indent| top.indent <= indent) {
                break;
            }
            self.close_top_list();
        }
    }

    fn write_heading(&mut self, level: u8, content: &str) {
        let tag = level.clamp(1, 6);
        self.out.push_str(&format!("<h{}>", tag));
        self.write_escaped_text(content);
        self.out.push_str(&format!("</h{}>\n", tag));
    }

    fn write_code_block(&mut self, language: &str, lines: &[CodeLine]) {
        if self.options.code_language_class && !language.is_empty() {
            self.write_str("<pre><code class=\"language-");
            escape_attr_into(&mut self.out, language);
            self.write_str("\">");
        } else {
            self.write_str("<pre><code>");
        }
        for line in lines {
            if let CodeLine::PlainLine(text) = line {
                self.write_escaped_text(text);
            }
            self.write_str("\n");
        }
        self.write_str("</code></pre>\n");
    }

    fn write_runs(&mut self, runs: &[InlineRun]) {
        for run in runs {
            self.write_run(run);
        }
    }

    fn write_run(&mut self, run: &InlineRun) {
        match run {
            InlineRun::PlainText(text) => self.write_escaped_text(text),
            InlineRun::InlineCode(code) => {
                self.write_str("<code>");
                self.write_escaped_text(code);
                self.write_str("</code>");
            }
            InlineRun::Bold(children) => self.write_wrapped("strong", children),
            InlineRun::Italic(children) => self.write_wrapped("em", children),
            InlineRun::Strikethrough(children) => self.write_wrapped("del", children),
            InlineRun::Link { text, url } => {
                self.write_str("<a href=\"");
                escape_url_into(&mut self.out, url);
                self.write_str("\">");
                self.write_runs(text);
                self.write_str("</a>");
            }
            InlineRun::Image { alt, url, title } => {
                self.write_str("<img src=\"");
                escape_url_into(&mut self.out, url);
                self.write_str("\" alt=\"");
                escape_attr_into(&mut self.out, alt);
                if let Some(title) = title {
                    self.write_str("\" title=\"");
                    escape_attr_into(&mut self.out, title);
                }
                self.write_str("\" />");
            }
        }
    }

    fn write_wrapped(&mut self, tag: &str, children: &[InlineRun]) {
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
        self.write_runs(children);
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    /// Get the output as a string slice.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consume writer and return output.
    pub fn into_string(self) -> String {
        self.out
    }
}

/// Render a document to HTML in one call.
pub fn render_html(doc: &Document, options: &RenderOptions) -> String {
    let mut writer = HtmlWriter::new(*options);
    writer.write_document(doc);
    writer.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn html(input: &str) -> String {
        render_html(&parse(input).unwrap(), &RenderOptions::default())
    }

    #[test]
    fn test_heading_and_paragraph() {
        assert_eq!(html("# Hi\n\nSome *text*"), "<h1>Hi</h1>\n<p>Some <em>text</em></p>\n");
    }

    #[test]
    fn test_underlined_heading_is_h2() {
        assert_eq!(html("Title\n==="), "<h2>Title</h2>\n");
    }

    #[test]
    fn test_paragraph_lines_joined() {
        assert_eq!(html("a\nb"), "<p>a\nb</p>\n");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(html("a < b & c"), "<p>a &lt; b &amp; c</p>\n");
        assert_eq!(html("# <tag>"), "<h1>&lt;tag&gt;</h1>\n");
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(html("1. a\n5. b"), "<ol>\n<li>a</li>\n<li>b</li>\n</ol>\n");
    }

    #[test]
    fn test_list_type_switch() {
        assert_eq!(
            html("- a\n1. b"),
            "<ul>\n<li>a</li>\n</ul>\n<ol>\n<li>b</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(
            html("- a\n  - b\n  - c\n- d"),
            "<ul>\n<li>a\n<ul>\n<li>b</li>\n<li>c</li>\n</ul>\n</li>\n<li>d</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_list_closed_by_paragraph() {
        assert_eq!(html("- a\n\ntext"), "<ul>\n<li>a</li>\n</ul>\n<p>text</p>\n");
    }

    #[test]
    fn test_checklist() {
        assert_eq!(
            html("- [x] done\n- [ ] todo"),
            "<ul class=\"checklist\">\n<li><input type=\"checkbox\" checked=\"\" disabled=\"\" /> done</li>\n<li><input type=\"checkbox\" disabled=\"\" /> todo</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_code_block() {
        assert_eq!(
            html("```rust\nlet a = 1 < 2;\n\n```"),
            "<pre><code class=\"language-rust\">let a = 1 &lt; 2;\n\n</code></pre>\n"
        );
    }

    #[test]
    fn test_code_block_without_class() {
        let options = RenderOptions {
            code_language_class: false,
            ..RenderOptions::default()
        };
        let doc = parse("```rust\nx\n```").unwrap();
        assert_eq!(render_html(&doc, &options), "<pre><code>x\n</code></pre>\n");
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(html("a\n\n---\n"), "<p>a</p>\n<hr />\n");
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(
            html("**b** `c` ~~d~~"),
            "<p><strong>b</strong> <code>c</code> <del>d</del></p>\n"
        );
    }

    #[test]
    fn test_link_and_image() {
        assert_eq!(
            html(r#"[a *b*](x?p=1&q=2) ![c "d"](i.png "T & U")"#),
            "<p><a href=\"x?p=1&amp;q=2\">a <em>b</em></a> <img src=\"i.png\" alt=\"c &quot;d&quot;\" title=\"T &amp; U\" /></p>\n"
        );
    }

    #[test]
    fn test_full_document() {
        let options = RenderOptions {
            full_document: true,
            ..RenderOptions::default()
        };
        let doc = parse("# A & B\n").unwrap();
        let out = render_html(&doc, &options);
        assert!(out.starts_with("<!DOCTYPE html>\n"));
        assert!(out.contains("<title>A &amp; B</title>"));
        assert!(out.ends_with("<h1>A &amp; B</h1>\n</body>\n</html>\n"));
    }
}

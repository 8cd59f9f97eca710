//! Document model produced by the block scanner.
//!
//! A [`Document`] is an ordered list of [`Block`]s in source order, always
//! terminated by exactly one [`Block::EndOfFile`]. It is built once per parse
//! and never mutated afterwards.

use serde::Serialize;

use crate::inline::InlineRun;

/// One line inside a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text")]
pub enum CodeLine {
    /// Verbatim line content.
    PlainLine(String),
    /// An empty line.
    BlankLine,
}

/// A top-level structural unit of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Block {
    /// `#`-prefixed heading. Level is the marker count, capped at 6.
    Heading { level: u8, content: String },
    /// Line followed by a `---` or `===` underline.
    UnderlinedHeading { content: String },
    /// `-`, `+` or `*` list item.
    Bullet { content: Vec<InlineRun> },
    /// `1.` list item; the number itself is not kept.
    NumberedBullet { content: Vec<InlineRun> },
    /// `- [x]` / `- [ ]` list item.
    Checklist {
        checked: bool,
        content: Vec<InlineRun>,
    },
    /// Triple-backtick fenced block.
    CodeBlock {
        language: String,
        lines: Vec<CodeLine>,
    },
    HorizontalRule,
    /// Consecutive plain-text lines.
    Paragraph { lines: Vec<Vec<InlineRun>> },
    /// Leading spaces before a structural line; `level` is the space count.
    Indent { level: usize },
    EndOfFile,
}

impl Block {
    /// Short variant name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::UnderlinedHeading { .. } => "underlined-heading",
            Block::Bullet { .. } => "bullet",
            Block::NumberedBullet { .. } => "numbered-bullet",
            Block::Checklist { .. } => "checklist",
            Block::CodeBlock { .. } => "code-block",
            Block::HorizontalRule => "horizontal-rule",
            Block::Paragraph { .. } => "paragraph",
            Block::Indent { .. } => "indent",
            Block::EndOfFile => "end-of-file",
        }
    }

    /// True for list items (bullets, numbered bullets, checklist items).
    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            Block::Bullet { .. } | Block::NumberedBullet { .. } | Block::Checklist { .. }
        )
    }
}

/// Ordered block sequence produced by one parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Wrap a finished block list. Only the assembler builds documents, so the
    /// trailing end-of-file marker is guaranteed.
    pub(crate) fn from_blocks(blocks: Vec<Block>) -> Self {
        debug_assert_eq!(blocks.last(), Some(&Block::EndOfFile));
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Number of blocks, end-of-file marker included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when the document holds nothing but the end-of-file marker.
    pub fn is_empty(&self) -> bool {
        self.blocks.len() <= 1
    }

    /// Headings in order as `(level, text)`; underlined headings count as level 2.
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Heading { level, content } => Some((*level, content.as_str())),
            Block::UnderlinedHeading { content } => Some((2, content.as_str())),
            _ => None,
        })
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

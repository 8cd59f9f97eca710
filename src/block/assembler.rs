//! Document assembly.
//!
//! Consecutive plain-text lines accumulate into one open paragraph. Any other
//! block, a blank line, or end of input flushes it, which keeps the block
//! list in source order.

use crate::document::{Block, Document};
use crate::inline::InlineRun;

/// Accumulates blocks into a [`Document`].
#[derive(Debug, Default)]
pub struct DocumentAssembler {
    blocks: Vec<Block>,
    /// Lines of the open paragraph.
    paragraph: Vec<Vec<InlineRun>>,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finished non-paragraph block, flushing the open paragraph first.
    pub fn append(&mut self, block: Block) {
        debug_assert!(!matches!(block, Block::Paragraph { .. } | Block::EndOfFile));
        self.flush();
        log::trace!("appending {}", block.kind());
        self.blocks.push(block);
    }

    /// Add a plain-text line to the open paragraph, opening one if needed.
    pub fn feed_plain_line(&mut self, runs: Vec<InlineRun>) {
        if !runs.is_empty() {
            self.paragraph.push(runs);
        }
    }

    /// Move the open paragraph, if any, into the document.
    pub fn flush(&mut self) {
        if !self.in_paragraph() {
            return;
        }
        let lines = std::mem::take(&mut self.paragraph);
        log::trace!("flushing paragraph of {} line(s)", lines.len());
        self.blocks.push(Block::Paragraph { lines });
    }

    /// True while a paragraph is being accumulated.
    pub fn in_paragraph(&self) -> bool {
        !self.paragraph.is_empty()
    }

    /// Flush once more and terminate the document.
    pub fn finalize(mut self) -> Document {
        self.flush();
        self.blocks.push(Block::EndOfFile);
        Document::from_blocks(self.blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> Vec<InlineRun> {
        vec![InlineRun::plain(text)]
    }

    #[test]
    fn test_empty_finalize() {
        let doc = DocumentAssembler::new().finalize();
        assert_eq!(doc.blocks(), &[Block::EndOfFile]);
    }

    #[test]
    fn test_plain_lines_merge() {
        let mut asm = DocumentAssembler::new();
        asm.feed_plain_line(line("one"));
        asm.feed_plain_line(line("two"));
        assert!(asm.in_paragraph());
        let doc = asm.finalize();
        assert_eq!(
            doc.blocks(),
            &[
                Block::Paragraph {
                    lines: vec![line("one"), line("two")]
                },
                Block::EndOfFile
            ]
        );
    }

    #[test]
    fn test_append_flushes_first() {
        let mut asm = DocumentAssembler::new();
        asm.feed_plain_line(line("text"));
        asm.append(Block::HorizontalRule);
        asm.feed_plain_line(line("after"));
        let doc = asm.finalize();
        assert_eq!(
            doc.blocks(),
            &[
                Block::Paragraph {
                    lines: vec![line("text")]
                },
                Block::HorizontalRule,
                Block::Paragraph {
                    lines: vec![line("after")]
                },
                Block::EndOfFile
            ]
        );
    }

    #[test]
    fn test_flush_is_idempotent() {
        let mut asm = DocumentAssembler::new();
        asm.feed_plain_line(line("x"));
        asm.flush();
        asm.flush();
        assert!(!asm.in_paragraph());
        assert_eq!(asm.finalize().len(), 2);
    }

    #[test]
    fn test_empty_line_ignored() {
        let mut asm = DocumentAssembler::new();
        asm.feed_plain_line(Vec::new());
        assert!(!asm.in_paragraph());
        assert_eq!(asm.finalize().blocks(), &[Block::EndOfFile]);
    }
}

//! Block scanner implementation.

use crate::cursor::Cursor;
use crate::document::{Block, CodeLine, Document};
use crate::error::{ParseError, Result};
use crate::inline::{InlineRun, InlineScanner};
use crate::limits::{CODE_FENCE_LEN, MAX_INPUT_LEN};
use crate::{Options, Range};

use super::assembler::DocumentAssembler;
use super::rules::{self, LineContext, LineKind};

/// Block scanner state.
pub struct BlockScanner<'a> {
    /// Source text.
    source: &'a str,
    /// Current cursor position.
    cursor: Cursor<'a>,
    /// Scanner for the text content of blocks.
    inline: InlineScanner,
    options: Options,
    /// Whether the previous line was blank; gates horizontal rules.
    prev_blank: bool,
    assembler: DocumentAssembler,
}

impl<'a> BlockScanner<'a> {
    /// Create a new block scanner.
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, Options::default())
    }

    /// Create a new block scanner with options.
    pub fn with_options(source: &'a str, options: Options) -> Self {
        Self {
            source,
            cursor: Cursor::new(source.as_bytes()),
            inline: InlineScanner::with_options(&options),
            options,
            prev_blank: false,
            assembler: DocumentAssembler::new(),
        }
    }

    /// Scan the whole source into a document.
    ///
    /// # Errors
    /// [`ParseError::InputTooLarge`] when the source is longer than
    /// [`MAX_INPUT_LEN`], and the code block errors otherwise.
    pub fn parse(mut self) -> Result<Document> {
        check_input_len(self.source.len())?;
        while !self.cursor.is_eof() {
            self.scan_line()?;
        }
        Ok(self.assembler.finalize())
    }

    /// Scan one line (two for underlined headings, several for code blocks).
    fn scan_line(&mut self) -> Result<()> {
        let indent = self.cursor.skip_spaces();
        let ctx = LineContext {
            prev_blank: self.prev_blank,
            options: self.options,
        };
        let kind = rules::classify(&self.cursor, &ctx);
        log::trace!(
            "offset {}: {:?} (indent {})",
            self.cursor.offset(),
            kind,
            indent
        );

        if indent > 0 && kind.is_structural() {
            self.assembler.append(Block::Indent { level: indent });
        }

        match kind {
            LineKind::Blank => {
                self.cursor.consume_line();
                self.assembler.flush();
            }
            LineKind::Heading { level, marker_len } => {
                self.cursor.advance_by(marker_len);
                self.cursor.skip_spaces();
                let content = self.take_line().to_string();
                self.assembler.append(Block::Heading { level, content });
            }
            LineKind::HorizontalRule => {
                self.cursor.consume_line();
                self.assembler.append(Block::HorizontalRule);
            }
            LineKind::Checklist { checked } => {
                // Bullet, space, then the three-byte box.
                self.cursor.advance();
                self.cursor.skip_spaces();
                self.cursor.advance_by(3);
                self.cursor.skip_spaces();
                let content = self.take_inline_line();
                self.assembler.append(Block::Checklist { checked, content });
            }
            LineKind::Bullet => {
                self.cursor.advance();
                self.cursor.skip_spaces();
                let content = self.take_inline_line();
                self.assembler.append(Block::Bullet { content });
            }
            LineKind::NumberedBullet { digits } => {
                self.cursor.advance_by(digits + 1);
                self.cursor.skip_spaces();
                let content = self.take_inline_line();
                self.assembler.append(Block::NumberedBullet { content });
            }
            LineKind::CodeFence => self.scan_code_block()?,
            LineKind::UnderlinedHeading => {
                let content = self.take_line().to_string();
                self.cursor.consume_line();
                self.assembler.append(Block::UnderlinedHeading { content });
            }
            LineKind::Text => {
                let content = self.take_inline_line();
                self.assembler.feed_plain_line(content);
            }
        }

        // Headings, list items and code blocks leave the flag untouched.
        match kind {
            LineKind::Blank => self.prev_blank = true,
            LineKind::Text | LineKind::UnderlinedHeading | LineKind::HorizontalRule => {
                self.prev_blank = false;
            }
            _ => {}
        }
        Ok(())
    }

    /// Consume the rest of the line, returning it without trailing whitespace.
    fn take_line(&mut self) -> &'a str {
        let range = self.cursor.consume_line().trim_end(self.source.as_bytes());
        range.as_str(self.source)
    }

    fn take_inline_line(&mut self) -> Vec<InlineRun> {
        let line = self.take_line();
        self.inline.scan(line)
    }

    /// Copy lines verbatim until a closing fence of exactly three backticks.
    fn scan_code_block(&mut self) -> Result<()> {
        let fence_offset = self.cursor.offset();
        self.cursor.advance_by(CODE_FENCE_LEN);
        let language = self.take_line().trim_start().to_string();
        log::debug!("code block opened at offset {} ({:?})", fence_offset, language);

        let mut lines = Vec::new();
        loop {
            if self.cursor.is_eof() {
                let line = Cursor::new_at(self.cursor.input(), fence_offset).line_number();
                log::debug!("code block opened at line {} is never closed", line);
                return Err(ParseError::UnclosedCodeBlock { line });
            }

            if self.cursor.at(b'`') {
                let found = self.cursor.run_length(b'`');
                if found != CODE_FENCE_LEN {
                    let line = self.cursor.line_number();
                    log::debug!("bad closing fence at line {}: {} backtick(s)", line, found);
                    return Err(ParseError::MalformedFence { line, found });
                }
                self.cursor.consume_line();
                break;
            }

            let line: Range = self.cursor.consume_line();
            lines.push(if line.is_empty() {
                CodeLine::BlankLine
            } else {
                CodeLine::PlainLine(line.as_str(self.source).to_string())
            });
        }

        self.assembler.append(Block::CodeBlock { language, lines });
        Ok(())
    }
}

/// Offsets are kept as `u32`, so longer input cannot be addressed.
fn check_input_len(len: usize) -> Result<()> {
    if len > MAX_INPUT_LEN {
        return Err(ParseError::InputTooLarge {
            len,
            max: MAX_INPUT_LEN,
        });
    }
    Ok(())
}

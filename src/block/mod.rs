//! Block-level scanner for Markdown.
//!
//! The block scanner is line-oriented and recognizes:
//! - `#` headings and underlined headings
//! - Horizontal rules
//! - Bullets, numbered bullets and checklist items
//! - Fenced code blocks
//! - Paragraphs
//!
//! Line text is handed to the inline scanner; finished blocks go through the
//! [`DocumentAssembler`], which owns paragraph accumulation.

mod assembler;
pub mod rules;
mod scanner;

pub use assembler::DocumentAssembler;
pub use rules::{LineContext, LineKind};
pub use scanner::BlockScanner;

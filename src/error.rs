//! Error types.
//!
//! Only one construct is fatal to a parse: a fenced code block that is never
//! properly closed. Everything else degrades to plain text. Input too large
//! to address is refused before scanning starts.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal scanning error. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An opening fence with no closing fence before end of input.
    #[error("Malformed code block: fence opened at line {line} is never closed")]
    UnclosedCodeBlock { line: usize },

    /// A line inside a code block starts with a backtick run that is not
    /// exactly three long.
    #[error("Malformed code block ending at line {line}: expected 3 backticks, found {found}")]
    MalformedFence { line: usize, found: usize },

    /// The input is longer than [`MAX_INPUT_LEN`](crate::limits::MAX_INPUT_LEN).
    #[error("Input of {len} bytes exceeds the limit of {max} bytes")]
    InputTooLarge { len: usize, max: usize },
}

impl ParseError {
    /// Line the error refers to, if it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnclosedCodeBlock { line } | ParseError::MalformedFence { line, .. } => {
                Some(*line)
            }
            ParseError::InputTooLarge { .. } => None,
        }
    }
}

/// Errors from the file-to-file conversion used by the binary.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for scanner results.
pub type Result<T> = std::result::Result<T, ParseError>;

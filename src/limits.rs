//! DoS prevention constants.
//!
//! These limits keep pathological inputs from causing deep recursion or
//! oversized numeric parsing.

/// Maximum input size in bytes. Source offsets are stored as `u32`.
pub const MAX_INPUT_LEN: usize = u32::MAX as usize;

/// Maximum nesting depth for inline runs (bold inside italic inside ...).
/// Deeper content is kept as plain text.
pub const MAX_INLINE_NESTING: usize = 32;

/// Maximum digits in a numbered bullet marker.
pub const MAX_LIST_MARKER_DIGITS: usize = 9;

/// Maximum number of `#` markers that count toward a heading level.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Exact backtick count of a code fence.
pub const CODE_FENCE_LEN: usize = 3;

/// Minimum marker run for horizontal rules and heading underlines.
pub const MIN_RULE_RUN: usize = 3;

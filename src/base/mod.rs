//! Foundation types for the RBI toolchain.
//!
//! This module provides the positional types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Byte offsets into source text
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Loc`] - The start/end location attached to declaration nodes
//!
//! This module has NO dependencies on other rbi modules.

mod span;

pub use span::{LineCol, LineIndex, Loc, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;

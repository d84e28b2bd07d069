//! Error types for parsing and translation.
//!
//! Validation problems are not errors in this sense: validators return
//! them as data (see [`crate::validate::Error`]).

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::Loc;

/// Malformed input to one of the parsers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at {loc}")]
pub struct SyntaxError {
    pub message: String,
    pub loc: Loc,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, loc: Loc) -> Self {
        Self {
            message: message.into(),
            loc,
        }
    }
}

/// A method type that cannot be reconciled with the method it annotates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// An entry has no parameter of the matching kind left to pair with.
    #[error("method `{method}` has no {kind} parameter at position {position}")]
    MissingParam {
        method: SmolStr,
        kind: &'static str,
        position: usize,
    },

    /// The method type declares a block but the method has no `&block`.
    #[error("method `{method}` has a block type but no block parameter")]
    MissingBlock { method: SmolStr },
}

/// How deeply types may nest before the parsers give up.
pub(crate) const MAX_NESTING: usize = 256;

/// Result type alias for parsing
pub type Result<T> = std::result::Result<T, SyntaxError>;

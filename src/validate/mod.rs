//! Structural validators.
//!
//! Every validator walks one or more trees and collects [`Error`]s; none of
//! them stops at the first problem or touches the trees it reads. Each
//! entry point returns `(success, errors)` where `success` is
//! `errors.is_empty()`.
//!
//! - [`duplicates`] reports names bound more than once across all trees.
//! - [`names`] checks declaration names against the identifier grammar.
//! - [`types`] checks signature and field types against a [`TypePolicy`].

use std::fmt;

use crate::base::Loc;
use crate::model::{Node, Tree};

pub mod duplicates;
pub mod names;
pub mod types;

pub use types::{TypeMatcher, TypePattern, TypePolicy};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// The validator that produced an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
    Duplicates,
    Names,
    Types,
}

impl ValidatorKind {
    /// Stable error code.
    pub fn code(self) -> &'static str {
        match self {
            ValidatorKind::Duplicates => codes::DUPLICATE_DEFINITION,
            ValidatorKind::Names => codes::INVALID_NAME,
            ValidatorKind::Types => codes::INVALID_TYPE,
        }
    }
}

/// Error codes, one per validator.
pub mod codes {
    /// A name bound by more than one declaration.
    pub const DUPLICATE_DEFINITION: &str = "E0001";
    /// A name that does not fit its declaration kind.
    pub const INVALID_NAME: &str = "E0002";
    /// A type rejected by the type policy.
    pub const INVALID_TYPE: &str = "E0003";
}

/// An extra location attached to an error, one per occurrence when an error
/// spans several declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub loc: Option<Loc>,
}

/// One validation problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub message: String,
    pub validator: ValidatorKind,
    /// Kind name of the offending node (`Module`, `Method`, `ReqParam`, ...).
    pub node_kind: &'static str,
    /// Location of the offending node.
    pub loc: Option<Loc>,
    pub sections: Vec<Section>,
}

impl Error {
    pub fn new(
        validator: ValidatorKind,
        message: impl Into<String>,
        node_kind: &'static str,
        loc: Option<&Loc>,
    ) -> Self {
        Self {
            message: message.into(),
            validator,
            node_kind,
            loc: loc.cloned(),
            sections: Vec::new(),
        }
    }

    /// An error pointing at `node`.
    pub fn at(validator: ValidatorKind, message: impl Into<String>, node: &Node) -> Self {
        Self::new(validator, message, node.kind_name(), node.loc())
    }

    pub fn with_section(mut self, loc: Option<&Loc>) -> Self {
        self.sections.push(Section { loc: loc.cloned() });
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.loc {
            Some(loc) => write!(f, "{loc}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Accumulates errors during a validation walk.
#[derive(Clone, Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<Error>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: Error) {
        tracing::trace!(code = error.validator.code(), message = %error.message, "validation error");
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `(success, errors)`.
    pub fn finish(self) -> (bool, Vec<Error>) {
        (self.errors.is_empty(), self.errors)
    }
}

/// Run every validator over `trees`, duplicates first, then names and types
/// per tree.
#[tracing::instrument(skip_all)]
pub fn validate_all(trees: &[Tree], policy: &TypePolicy) -> (bool, Vec<Error>) {
    let mut errors = duplicates::validate(trees).1;
    errors.extend(names::validate(trees).1);
    errors.extend(types::validate(trees, policy).1);
    tracing::debug!(errors = errors.len(), "validated trees");
    (errors.is_empty(), errors)
}

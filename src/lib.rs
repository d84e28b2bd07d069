//! # rbi-base
//!
//! Core library for RBI interface files: a declaration tree with a closed
//! type algebra, a canonical printer, translation of external RBS type
//! annotations into signatures, a qualified-name index and validators.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! validate  → Duplicates / Names / Types validators
//!   ↓
//! printer   → Canonical RBI text
//!   ↓
//! translate → RBS types and method types → Sorbet types and sigs
//!   ↓
//! index     → Fully-qualified name → declaration
//!   ↓
//! visit     → Visitor trait and walk functions
//!   ↓
//! model     → Declaration tree and type expressions
//!   ↓
//! syntax    → RBI source → tree (logos lexer, recursive descent)
//! rbs       → RBS type grammar (logos lexer, recursive descent)
//!   ↓
//! base      → Primitives (Loc, LineCol, LineIndex)
//! ```
//!
//! ## Example
//!
//! ```
//! let tree = rbi::parse("module A\n  def foo(x); end\nend\n").unwrap();
//! let text = rbi::print(&tree, &rbi::PrintOptions::default());
//! assert_eq!(rbi::parse(&text).map(|t| rbi::print(&t, &Default::default())), Ok(text));
//! ```

/// Foundation types: Loc, LineCol, LineIndex
pub mod base;

/// SyntaxError and TranslationError
pub mod error;

/// Fully-qualified name index
pub mod index;

/// Declaration tree and type expression algebra
pub mod model;

/// Canonical text rendering
pub mod printer;

/// RBS type annotation grammar
pub mod rbs;

/// RBI source parsing
pub mod syntax;

/// RBS to Sorbet translation
pub mod translate;

/// Validators over declaration trees
pub mod validate;

/// Visitor trait and walk functions
pub mod visit;

pub use base::{LineCol, LineIndex, Loc, TextRange, TextSize};
pub use error::{SyntaxError, TranslationError};
pub use index::Index;
pub use model::{Node, Tree, TypeExpr};
pub use printer::{PrintOptions, print};
pub use syntax::{parse, parse_file, parse_files};
pub use translate::{translate_sig, translate_type};
pub use visit::Visitor;

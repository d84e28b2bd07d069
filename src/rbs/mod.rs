//! The RBS type-annotation grammar.
//!
//! This is the external syntax that [`crate::translate`] consumes. It is
//! kept separate from the declaration model: nothing here knows about
//! Sorbet types, and nothing in [`crate::model`] knows about RBS.

mod ast;
mod lexer;
mod parser;

pub use ast::{BaseType, Block, FnParam, Function, Literal, MethodType, ProcSig, RbsType};
pub use parser::{parse_method_type, parse_type};

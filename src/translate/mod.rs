//! Translation from the RBS grammar into the declaration model.
//!
//! - [`translate_type`] maps one RBS type to a [`crate::model::TypeExpr`].
//!   The mapping is total: interfaces and literal types become
//!   `T.untyped`.
//! - [`translate_sig`] turns an RBS method type into a
//!   [`crate::model::Sig`] for an existing method, borrowing parameter
//!   names from the method where the RBS entries are unnamed.

mod sig;
mod types;

pub use sig::translate_sig;
pub use types::{TypeTranslator, translate_type};

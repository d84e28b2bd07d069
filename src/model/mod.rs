//! Declaration tree model.
//!
//! A [`Tree`] is one interface file: an ordered list of [`Node`]s, some of
//! which are [`Scope`]s owning further nodes. Methods and attributes carry
//! [`Sig`]s whose types are [`TypeExpr`] values.
//!
//! Nodes hold no reference to their parent. Anything that needs the
//! enclosing scope chain (qualified names, the index) gets it from the
//! traversal that reaches the node.

mod method;
mod node;
mod types;

pub use method::{Method, Param, ParamKind, Sig, SigFlags, SigParam};
pub use node::{
    Attr, AttrKind, Comment, Const, EnumBlock, FieldKind, Helper, Mixin, MixinKind, Node, Scope,
    ScopeKind, StructField, Tree, TypeMember, Visibility,
};
pub use types::{ProcType, TypeExpr, TypeKind};

//! Methods, parameters and signatures.

use smol_str::SmolStr;

use super::types::TypeExpr;
use super::{Comment, Visibility};
use crate::base::Loc;

/// The kind of a method parameter, with the default value for optional ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// `a`
    Required,
    /// `a = default`
    Optional { default: String },
    /// `*a`
    Rest,
    /// `a:`
    Keyword,
    /// `a: default`
    KeywordOptional { default: String },
    /// `**a`
    KeywordRest,
    /// `&a`
    Block,
}

impl ParamKind {
    /// Kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParamKind::Required => "ReqParam",
            ParamKind::Optional { .. } => "OptParam",
            ParamKind::Rest => "RestParam",
            ParamKind::Keyword => "KwParam",
            ParamKind::KeywordOptional { .. } => "KwOptParam",
            ParamKind::KeywordRest => "KwRestParam",
            ParamKind::Block => "BlockParam",
        }
    }

    /// `Required` or `Optional`.
    pub fn is_positional(&self) -> bool {
        matches!(self, ParamKind::Required | ParamKind::Optional { .. })
    }

    /// `Keyword` or `KeywordOptional`.
    pub fn is_keyword(&self) -> bool {
        matches!(self, ParamKind::Keyword | ParamKind::KeywordOptional { .. })
    }
}

/// A parameter of a method definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: SmolStr,
    pub kind: ParamKind,
    pub loc: Option<Loc>,
}

impl Param {
    pub fn new(name: impl Into<SmolStr>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            loc: None,
        }
    }

    pub fn required(name: impl Into<SmolStr>) -> Self {
        Self::new(name, ParamKind::Required)
    }

    pub fn optional(name: impl Into<SmolStr>, default: impl Into<String>) -> Self {
        Self::new(
            name,
            ParamKind::Optional {
                default: default.into(),
            },
        )
    }

    pub fn rest(name: impl Into<SmolStr>) -> Self {
        Self::new(name, ParamKind::Rest)
    }

    pub fn keyword(name: impl Into<SmolStr>) -> Self {
        Self::new(name, ParamKind::Keyword)
    }

    pub fn keyword_optional(name: impl Into<SmolStr>, default: impl Into<String>) -> Self {
        Self::new(
            name,
            ParamKind::KeywordOptional {
                default: default.into(),
            },
        )
    }

    pub fn keyword_rest(name: impl Into<SmolStr>) -> Self {
        Self::new(name, ParamKind::KeywordRest)
    }

    pub fn block(name: impl Into<SmolStr>) -> Self {
        Self::new(name, ParamKind::Block)
    }
}

/// A `def` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method {
    pub name: SmolStr,
    pub params: Vec<Param>,
    /// Signatures, one per overload, printed above the `def`.
    pub sigs: Vec<Sig>,
    /// `def self.name`
    pub is_singleton: bool,
    pub visibility: Visibility,
    pub loc: Option<Loc>,
    pub comments: Vec<Comment>,
}

impl Method {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            sigs: Vec::new(),
            is_singleton: false,
            visibility: Visibility::Public,
            loc: None,
            comments: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_sig(mut self, sig: Sig) -> Self {
        self.sigs.push(sig);
        self
    }

    pub fn singleton(mut self) -> Self {
        self.is_singleton = true;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_comment(mut self, text: impl Into<String>) -> Self {
        self.comments.push(Comment::new(text));
        self
    }

    /// Append a parameter.
    pub fn add_param(&mut self, param: Param) {
        self.params.push(param);
    }

    /// Append a signature.
    pub fn add_sig(&mut self, sig: Sig) {
        self.sigs.push(sig);
    }

    /// The block parameter, if the method declares one.
    pub fn block_param(&self) -> Option<&Param> {
        self.params.iter().find(|p| p.kind == ParamKind::Block)
    }
}

/// A parameter entry inside a signature: `params(name: Type)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigParam {
    pub name: SmolStr,
    pub ty: TypeExpr,
}

impl SigParam {
    pub fn new(name: impl Into<SmolStr>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Modifier flags of a signature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SigFlags {
    pub is_abstract: bool,
    pub is_override: bool,
    pub is_overridable: bool,
    pub is_final: bool,
    /// `override(allow_incompatible: true)`
    pub allow_incompatible_override: bool,
}

/// A `sig { ... }` block attached to a method or attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sig {
    pub params: Vec<SigParam>,
    /// `None` prints as `void`, like `Some(TypeExpr::Void)`.
    pub return_type: Option<TypeExpr>,
    /// `bind(Type)`
    pub bind: Option<TypeExpr>,
    pub flags: SigFlags,
    /// `type_parameters(:U, :V)`
    pub type_params: Vec<SmolStr>,
    pub loc: Option<Loc>,
}

impl Sig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: impl Into<SmolStr>, ty: TypeExpr) -> Self {
        self.params.push(SigParam::new(name, ty));
        self
    }

    pub fn returns(mut self, ty: TypeExpr) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn bind(mut self, ty: TypeExpr) -> Self {
        self.bind = Some(ty);
        self
    }

    pub fn type_param(mut self, name: impl Into<SmolStr>) -> Self {
        self.type_params.push(name.into());
        self
    }

    pub fn with_flags(mut self, flags: SigFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Every type expression referenced by parameters and the return type,
    /// in signature order.
    pub fn types(&self) -> impl Iterator<Item = &TypeExpr> {
        self.params
            .iter()
            .map(|p| &p.ty)
            .chain(self.return_type.as_ref())
    }
}

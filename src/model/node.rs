//! Declaration nodes and trees.

use smol_str::SmolStr;

use super::method::{Method, Sig};
use super::types::TypeExpr;
use crate::base::Loc;

/// A leading comment line, stored without its `#` marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub loc: Option<Loc>,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            loc: None,
        }
    }
}

/// Method and attribute visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// The root of a declaration file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tree {
    /// File header comments (`# typed: strict`).
    pub comments: Vec<Comment>,
    pub nodes: Vec<Node>,
    pub loc: Option<Loc>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child node.
    pub fn add(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    /// Builder form of [`Tree::add`].
    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.add(node);
        self
    }

    pub fn with_comment(mut self, text: impl Into<String>) -> Self {
        self.comments.push(Comment::new(text));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Which kind of namespace a [`Scope`] opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// `module Name`
    Module,
    /// `class Name < Superclass`
    Class { superclass: Option<SmolStr> },
    /// `class << self`
    SingletonClass,
    /// `Name = ::Struct.new(:a, :b, keyword_init: true)`
    Struct {
        members: Vec<SmolStr>,
        keyword_init: bool,
    },
    /// `class Name < T::Struct`
    TStruct,
    /// `class Name < T::Enum`
    TEnum,
}

/// A namespace owning nested declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scope {
    pub kind: ScopeKind,
    /// Possibly `::`-qualified. Empty for `class << self`.
    pub name: SmolStr,
    pub nodes: Vec<Node>,
    pub loc: Option<Loc>,
    pub comments: Vec<Comment>,
}

impl Scope {
    pub fn new(kind: ScopeKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
            nodes: Vec::new(),
            loc: None,
            comments: Vec::new(),
        }
    }

    pub fn module(name: impl Into<SmolStr>) -> Self {
        Self::new(ScopeKind::Module, name)
    }

    pub fn class(name: impl Into<SmolStr>, superclass: Option<&str>) -> Self {
        Self::new(
            ScopeKind::Class {
                superclass: superclass.map(SmolStr::new),
            },
            name,
        )
    }

    pub fn singleton_class() -> Self {
        Self::new(ScopeKind::SingletonClass, "")
    }

    pub fn struct_class<S: Into<SmolStr>>(
        name: impl Into<SmolStr>,
        members: impl IntoIterator<Item = S>,
        keyword_init: bool,
    ) -> Self {
        Self::new(
            ScopeKind::Struct {
                members: members.into_iter().map(Into::into).collect(),
                keyword_init,
            },
            name,
        )
    }

    pub fn t_struct(name: impl Into<SmolStr>) -> Self {
        Self::new(ScopeKind::TStruct, name)
    }

    pub fn t_enum(name: impl Into<SmolStr>) -> Self {
        Self::new(ScopeKind::TEnum, name)
    }

    /// Append a child node.
    pub fn add(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    /// Builder form of [`Scope::add`].
    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.add(node);
        self
    }

    pub fn with_comment(mut self, text: impl Into<String>) -> Self {
        self.comments.push(Comment::new(text));
        self
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ScopeKind::Module => "Module",
            ScopeKind::Class { .. } => "Class",
            ScopeKind::SingletonClass => "SingletonClass",
            ScopeKind::Struct { .. } => "Struct",
            ScopeKind::TStruct => "TStruct",
            ScopeKind::TEnum => "TEnum",
        }
    }
}

/// `NAME = value`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Const {
    pub name: SmolStr,
    /// The literal right-hand side, verbatim.
    pub value: String,
    pub loc: Option<Loc>,
    pub comments: Vec<Comment>,
}

impl Const {
    pub fn new(name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            loc: None,
            comments: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttrKind {
    Reader,
    Writer,
    Accessor,
}

/// `attr_reader :a, :b`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attr {
    pub kind: AttrKind,
    pub names: Vec<SmolStr>,
    pub sigs: Vec<Sig>,
    pub visibility: Visibility,
    pub loc: Option<Loc>,
    pub comments: Vec<Comment>,
}

impl Attr {
    pub fn new<S: Into<SmolStr>>(kind: AttrKind, names: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind,
            names: names.into_iter().map(Into::into).collect(),
            sigs: Vec::new(),
            visibility: Visibility::Public,
            loc: None,
            comments: Vec::new(),
        }
    }

    pub fn reader(name: impl Into<SmolStr>) -> Self {
        Self::new(AttrKind::Reader, [name.into()])
    }

    pub fn writer(name: impl Into<SmolStr>) -> Self {
        Self::new(AttrKind::Writer, [name.into()])
    }

    pub fn accessor(name: impl Into<SmolStr>) -> Self {
        Self::new(AttrKind::Accessor, [name.into()])
    }

    pub fn with_sig(mut self, sig: Sig) -> Self {
        self.sigs.push(sig);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// The method names this attribute defines (`name`, `name=`).
    pub fn method_names(&self) -> Vec<SmolStr> {
        let mut out = Vec::new();
        for name in &self.names {
            if matches!(self.kind, AttrKind::Reader | AttrKind::Accessor) {
                out.push(name.clone());
            }
            if matches!(self.kind, AttrKind::Writer | AttrKind::Accessor) {
                out.push(SmolStr::from(format!("{name}=")));
            }
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MixinKind {
    Include,
    Extend,
    MixesInClassMethods,
}

/// `include A, B`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mixin {
    pub kind: MixinKind,
    pub names: Vec<SmolStr>,
    pub loc: Option<Loc>,
    pub comments: Vec<Comment>,
}

impl Mixin {
    pub fn new<S: Into<SmolStr>>(kind: MixinKind, names: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind,
            names: names.into_iter().map(Into::into).collect(),
            loc: None,
            comments: Vec::new(),
        }
    }

    pub fn include(name: impl Into<SmolStr>) -> Self {
        Self::new(MixinKind::Include, [name.into()])
    }

    pub fn extend(name: impl Into<SmolStr>) -> Self {
        Self::new(MixinKind::Extend, [name.into()])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `const :name, Type`
    Const,
    /// `prop :name, Type`
    Prop,
}

/// A `T::Struct` field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructField {
    pub kind: FieldKind,
    pub name: SmolStr,
    pub ty: TypeExpr,
    /// `default: value`, verbatim.
    pub default: Option<String>,
    pub loc: Option<Loc>,
    pub comments: Vec<Comment>,
}

impl StructField {
    pub fn new(kind: FieldKind, name: impl Into<SmolStr>, ty: TypeExpr) -> Self {
        Self {
            kind,
            name: name.into(),
            ty,
            default: None,
            loc: None,
            comments: Vec::new(),
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// `enums do ... end` inside a `T::Enum`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnumBlock {
    pub values: Vec<SmolStr>,
    pub loc: Option<Loc>,
    pub comments: Vec<Comment>,
}

impl EnumBlock {
    pub fn new<S: Into<SmolStr>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            loc: None,
            comments: Vec::new(),
        }
    }
}

/// A class-body helper call: `abstract!`, `interface!`, `sealed!`, `final!`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Helper {
    /// Name without the trailing `!`.
    pub name: SmolStr,
    pub loc: Option<Loc>,
    pub comments: Vec<Comment>,
}

impl Helper {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            loc: None,
            comments: Vec::new(),
        }
    }
}

/// `Elem = type_member(:out)` / `type_template`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMember {
    pub name: SmolStr,
    /// The right-hand side, verbatim.
    pub value: String,
    pub loc: Option<Loc>,
    pub comments: Vec<Comment>,
}

impl TypeMember {
    pub fn new(name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            loc: None,
            comments: Vec::new(),
        }
    }
}

/// One declaration in a tree.
///
/// The set is closed: visitors match it exhaustively, so a new kind must be
/// handled everywhere before the crate compiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Scope(Scope),
    Const(Const),
    Method(Method),
    Attr(Attr),
    Mixin(Mixin),
    StructField(StructField),
    EnumBlock(EnumBlock),
    Helper(Helper),
    TypeMember(TypeMember),
}

impl Node {
    /// Kind name used in diagnostics (`Module`, `Method`, `AttrReader`, ...).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Scope(scope) => scope.kind_name(),
            Node::Const(_) => "Const",
            Node::Method(_) => "Method",
            Node::Attr(attr) => match attr.kind {
                AttrKind::Reader => "AttrReader",
                AttrKind::Writer => "AttrWriter",
                AttrKind::Accessor => "AttrAccessor",
            },
            Node::Mixin(mixin) => match mixin.kind {
                MixinKind::Include => "Include",
                MixinKind::Extend => "Extend",
                MixinKind::MixesInClassMethods => "MixesInClassMethods",
            },
            Node::StructField(field) => match field.kind {
                FieldKind::Const => "TStructConst",
                FieldKind::Prop => "TStructProp",
            },
            Node::EnumBlock(_) => "TEnumBlock",
            Node::Helper(_) => "Helper",
            Node::TypeMember(_) => "TypeMember",
        }
    }

    pub fn loc(&self) -> Option<&Loc> {
        match self {
            Node::Scope(n) => n.loc.as_ref(),
            Node::Const(n) => n.loc.as_ref(),
            Node::Method(n) => n.loc.as_ref(),
            Node::Attr(n) => n.loc.as_ref(),
            Node::Mixin(n) => n.loc.as_ref(),
            Node::StructField(n) => n.loc.as_ref(),
            Node::EnumBlock(n) => n.loc.as_ref(),
            Node::Helper(n) => n.loc.as_ref(),
            Node::TypeMember(n) => n.loc.as_ref(),
        }
    }

    pub fn comments(&self) -> &[Comment] {
        match self {
            Node::Scope(n) => &n.comments,
            Node::Const(n) => &n.comments,
            Node::Method(n) => &n.comments,
            Node::Attr(n) => &n.comments,
            Node::Mixin(n) => &n.comments,
            Node::StructField(n) => &n.comments,
            Node::EnumBlock(n) => &n.comments,
            Node::Helper(n) => &n.comments,
            Node::TypeMember(n) => &n.comments,
        }
    }

    pub(crate) fn comments_mut(&mut self) -> &mut Vec<Comment> {
        match self {
            Node::Scope(n) => &mut n.comments,
            Node::Const(n) => &mut n.comments,
            Node::Method(n) => &mut n.comments,
            Node::Attr(n) => &mut n.comments,
            Node::Mixin(n) => &mut n.comments,
            Node::StructField(n) => &mut n.comments,
            Node::EnumBlock(n) => &mut n.comments,
            Node::Helper(n) => &mut n.comments,
            Node::TypeMember(n) => &mut n.comments,
        }
    }

    /// Signatures attached to a method or attribute.
    pub fn sigs(&self) -> &[Sig] {
        match self {
            Node::Method(method) => &method.sigs,
            Node::Attr(attr) => &attr.sigs,
            _ => &[],
        }
    }

    /// Child nodes if this node is a scope.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Scope(scope) => &scope.nodes,
            _ => &[],
        }
    }
}

macro_rules! impl_into_node {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                #[inline]
                fn from(node: $ty) -> Self {
                    Node::$ty(node)
                }
            }
        )*
    };
}

impl_into_node! {
    Scope,
    Const,
    Method,
    Attr,
    Mixin,
    StructField,
    EnumBlock,
    Helper,
    TypeMember,
}

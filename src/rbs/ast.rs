//! Parsed RBS types and method types.

use smol_str::SmolStr;

/// Built-in base types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// `untyped`
    Any,
    /// `bool` / `boolish`
    Bool,
    /// `bot`
    Bottom,
    /// `class`
    Class,
    /// `instance`
    Instance,
    /// `nil`
    Nil,
    /// `self`
    SelfType,
    /// `top`
    Top,
    /// `void`
    Void,
}

impl BaseType {
    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "untyped" => BaseType::Any,
            "bool" | "boolish" => BaseType::Bool,
            "bot" => BaseType::Bottom,
            "class" => BaseType::Class,
            "instance" => BaseType::Instance,
            "nil" => BaseType::Nil,
            "self" => BaseType::SelfType,
            "top" => BaseType::Top,
            "void" => BaseType::Void,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Integer(String),
    String(String),
    Symbol(SmolStr),
    Bool(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RbsType {
    Base(BaseType),
    /// `Foo`, `::Foo::Bar[A, B]`
    ClassInstance { name: SmolStr, args: Vec<RbsType> },
    /// `singleton(Foo)`
    ClassSingleton { name: SmolStr },
    /// `_Each[A]`
    Interface { name: SmolStr, args: Vec<RbsType> },
    /// `A | B`
    Union(Vec<RbsType>),
    /// `A & B`
    Intersection(Vec<RbsType>),
    /// `A?`
    Optional(Box<RbsType>),
    /// `[A, B]`
    Tuple(Vec<RbsType>),
    /// `{ key: A }`
    Record(Vec<(SmolStr, RbsType)>),
    /// `^(A) -> B`
    Proc(Box<ProcSig>),
    Literal(Literal),
}

impl RbsType {
    pub fn class(name: impl Into<SmolStr>) -> Self {
        RbsType::ClassInstance {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

/// One entry of a parameter list: a type and an optional name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FnParam {
    pub ty: RbsType,
    pub name: Option<SmolStr>,
}

impl FnParam {
    pub fn new(ty: RbsType) -> Self {
        Self { ty, name: None }
    }

    pub fn named(ty: RbsType, name: impl Into<SmolStr>) -> Self {
        Self {
            ty,
            name: Some(name.into()),
        }
    }
}

/// The parameter list and return type shared by procs, blocks and methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub required: Vec<FnParam>,
    pub optional: Vec<FnParam>,
    pub rest: Option<FnParam>,
    /// Required positionals after the rest parameter.
    pub trailing: Vec<FnParam>,
    pub required_keywords: Vec<(SmolStr, FnParam)>,
    pub optional_keywords: Vec<(SmolStr, FnParam)>,
    pub rest_keywords: Option<FnParam>,
    pub returns: RbsType,
}

impl Function {
    /// `() -> returns`
    pub fn returning(returns: RbsType) -> Self {
        Self {
            required: Vec::new(),
            optional: Vec::new(),
            rest: None,
            trailing: Vec::new(),
            required_keywords: Vec::new(),
            optional_keywords: Vec::new(),
            rest_keywords: None,
            returns,
        }
    }

    /// Positional entries in call order: required, optional, trailing.
    pub fn positionals(&self) -> impl Iterator<Item = &FnParam> {
        self.required
            .iter()
            .chain(&self.optional)
            .chain(&self.trailing)
    }
}

/// `{ (A) [self: S] -> B }`, possibly preceded by `?`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub function: Function,
    pub self_type: Option<RbsType>,
    pub required: bool,
}

/// `^(A) [self: S] ?{ ... } -> B`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcSig {
    pub function: Function,
    pub self_type: Option<RbsType>,
    pub block: Option<Block>,
}

/// `[U] (A a) ?{ ... } -> B`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodType {
    pub type_params: Vec<SmolStr>,
    pub function: Function,
    pub block: Option<Block>,
}

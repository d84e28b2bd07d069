//! Type expressions: the closed algebra of Sorbet-style types.
//!
//! A [`TypeExpr`] is a plain recursive value. Equality is structural:
//! lists compare in order, name-keyed maps ([`TypeExpr::Shape`] fields and
//! [`ProcType`] parameters) compare by key regardless of insertion order.
//!
//! The [`fmt::Display`] impl is the canonical stringifier used by the
//! printer and by text-based type policies.

use std::fmt;

use indexmap::IndexMap;
use smol_str::SmolStr;

/// A type expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExpr {
    /// A (possibly qualified) class name: `Integer`, `::Foo::Bar`.
    Simple(SmolStr),
    /// A generic instantiation: `T::Array[Integer]`.
    Generic {
        base: SmolStr,
        args: Vec<TypeExpr>,
    },
    /// `T.nilable(inner)`
    Nilable(Box<TypeExpr>),
    /// `T.any(a, b, ...)`
    Union(Vec<TypeExpr>),
    /// `T.all(a, b, ...)`
    Intersection(Vec<TypeExpr>),
    /// `[a, b, ...]`
    Tuple(Vec<TypeExpr>),
    /// `{ key: type, ... }`
    Shape(IndexMap<SmolStr, TypeExpr>),
    /// `T.proc.params(...).returns(...)`
    Proc(ProcType),
    /// `T.class_of(inner)`
    ClassOf(Box<TypeExpr>),
    /// `T.type_parameter(:name)`
    TypeParameter(SmolStr),
    /// `T.self_type`
    SelfType,
    /// `T.untyped`
    Untyped,
    /// `void`
    Void,
    /// `T.noreturn`
    NoReturn,
    /// `T.anything`
    Anything,
    /// `T::Boolean`
    Boolean,
    /// `T.attached_class`
    AttachedClass,
}

/// The payload of a [`TypeExpr::Proc`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcType {
    /// Parameters keyed by name.
    pub params: IndexMap<SmolStr, TypeExpr>,
    /// Return type (`Void` prints as `.void`).
    pub returns: Box<TypeExpr>,
    /// Type bound to `self` inside the proc.
    pub bind: Option<Box<TypeExpr>>,
}

impl ProcType {
    /// A proc with no parameters returning `void`.
    pub fn new() -> Self {
        Self {
            params: IndexMap::new(),
            returns: Box::new(TypeExpr::Void),
            bind: None,
        }
    }

    /// Add a parameter.
    pub fn param(mut self, name: impl Into<SmolStr>, ty: TypeExpr) -> Self {
        self.params.insert(name.into(), ty);
        self
    }

    /// Set the return type.
    pub fn returns(mut self, ty: TypeExpr) -> Self {
        self.returns = Box::new(ty);
        self
    }

    /// Set the bound `self` type.
    pub fn bind(mut self, ty: TypeExpr) -> Self {
        self.bind = Some(Box::new(ty));
        self
    }
}

impl Default for ProcType {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ProcType> for TypeExpr {
    fn from(proc_type: ProcType) -> Self {
        TypeExpr::Proc(proc_type)
    }
}

/// The variant tag of a [`TypeExpr`], used by structural type policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Simple,
    Generic,
    Nilable,
    Union,
    Intersection,
    Tuple,
    Shape,
    Proc,
    ClassOf,
    TypeParameter,
    SelfType,
    Untyped,
    Void,
    NoReturn,
    Anything,
    Boolean,
    AttachedClass,
}

impl TypeExpr {
    pub fn simple(name: impl Into<SmolStr>) -> Self {
        TypeExpr::Simple(name.into())
    }

    pub fn generic(base: impl Into<SmolStr>, args: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Generic {
            base: base.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn nilable(inner: TypeExpr) -> Self {
        TypeExpr::Nilable(Box::new(inner))
    }

    /// Build a union. Members are kept as given; nested unions are not
    /// flattened.
    pub fn any(types: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Union(types.into_iter().collect())
    }

    pub fn all(types: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Intersection(types.into_iter().collect())
    }

    pub fn tuple(types: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Tuple(types.into_iter().collect())
    }

    pub fn shape<K: Into<SmolStr>>(fields: impl IntoIterator<Item = (K, TypeExpr)>) -> Self {
        TypeExpr::Shape(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn class_of(inner: TypeExpr) -> Self {
        TypeExpr::ClassOf(Box::new(inner))
    }

    pub fn type_parameter(name: impl Into<SmolStr>) -> Self {
        TypeExpr::TypeParameter(name.into())
    }

    /// The variant tag of this expression.
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeExpr::Simple(_) => TypeKind::Simple,
            TypeExpr::Generic { .. } => TypeKind::Generic,
            TypeExpr::Nilable(_) => TypeKind::Nilable,
            TypeExpr::Union(_) => TypeKind::Union,
            TypeExpr::Intersection(_) => TypeKind::Intersection,
            TypeExpr::Tuple(_) => TypeKind::Tuple,
            TypeExpr::Shape(_) => TypeKind::Shape,
            TypeExpr::Proc(_) => TypeKind::Proc,
            TypeExpr::ClassOf(_) => TypeKind::ClassOf,
            TypeExpr::TypeParameter(_) => TypeKind::TypeParameter,
            TypeExpr::SelfType => TypeKind::SelfType,
            TypeExpr::Untyped => TypeKind::Untyped,
            TypeExpr::Void => TypeKind::Void,
            TypeExpr::NoReturn => TypeKind::NoReturn,
            TypeExpr::Anything => TypeKind::Anything,
            TypeExpr::Boolean => TypeKind::Boolean,
            TypeExpr::AttachedClass => TypeKind::AttachedClass,
        }
    }

    /// Direct sub-expressions, in display order.
    pub fn children(&self) -> Vec<&TypeExpr> {
        match self {
            TypeExpr::Generic { args, .. } => args.iter().collect(),
            TypeExpr::Nilable(inner) | TypeExpr::ClassOf(inner) => vec![inner.as_ref()],
            TypeExpr::Union(types) | TypeExpr::Intersection(types) | TypeExpr::Tuple(types) => {
                types.iter().collect()
            }
            TypeExpr::Shape(fields) => fields.values().collect(),
            TypeExpr::Proc(proc_type) => {
                let mut children: Vec<&TypeExpr> = Vec::new();
                if let Some(bind) = &proc_type.bind {
                    children.push(bind);
                }
                children.extend(proc_type.params.values());
                children.push(&proc_type.returns);
                children
            }
            TypeExpr::Simple(_)
            | TypeExpr::TypeParameter(_)
            | TypeExpr::SelfType
            | TypeExpr::Untyped
            | TypeExpr::Void
            | TypeExpr::NoReturn
            | TypeExpr::Anything
            | TypeExpr::Boolean
            | TypeExpr::AttachedClass => Vec::new(),
        }
    }

    /// True if `pred` holds for this expression or any nested one.
    pub fn any_node(&self, pred: &dyn Fn(&TypeExpr) -> bool) -> bool {
        pred(self) || self.children().into_iter().any(|child| child.any_node(pred))
    }
}

/// Whether a shape key can be written as a bare `key:` label.
pub(crate) fn is_label(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[TypeExpr]) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &IndexMap<SmolStr, TypeExpr>) -> fmt::Result {
    for (i, (name, ty)) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{name}: {ty}")?;
    }
    Ok(())
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Simple(name) => f.write_str(name),
            TypeExpr::Generic { base, args } => {
                write!(f, "{base}[")?;
                write_list(f, args)?;
                f.write_str("]")
            }
            TypeExpr::Nilable(inner) => write!(f, "T.nilable({inner})"),
            TypeExpr::Union(types) => {
                f.write_str("T.any(")?;
                write_list(f, types)?;
                f.write_str(")")
            }
            TypeExpr::Intersection(types) => {
                f.write_str("T.all(")?;
                write_list(f, types)?;
                f.write_str(")")
            }
            TypeExpr::Tuple(types) => {
                f.write_str("[")?;
                write_list(f, types)?;
                f.write_str("]")
            }
            TypeExpr::Shape(fields) => {
                if fields.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (key, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if is_label(key) {
                        write!(f, "{key}: {ty}")?;
                    } else {
                        write!(f, "{key:?}: {ty}")?;
                    }
                }
                f.write_str(" }")
            }
            TypeExpr::Proc(proc_type) => {
                f.write_str("T.proc")?;
                if let Some(bind) = &proc_type.bind {
                    write!(f, ".bind({bind})")?;
                }
                if !proc_type.params.is_empty() {
                    f.write_str(".params(")?;
                    write_params(f, &proc_type.params)?;
                    f.write_str(")")?;
                }
                match proc_type.returns.as_ref() {
                    TypeExpr::Void => f.write_str(".void"),
                    returns => write!(f, ".returns({returns})"),
                }
            }
            TypeExpr::ClassOf(inner) => write!(f, "T.class_of({inner})"),
            TypeExpr::TypeParameter(name) => write!(f, "T.type_parameter(:{name})"),
            TypeExpr::SelfType => f.write_str("T.self_type"),
            TypeExpr::Untyped => f.write_str("T.untyped"),
            TypeExpr::Void => f.write_str("void"),
            TypeExpr::NoReturn => f.write_str("T.noreturn"),
            TypeExpr::Anything => f.write_str("T.anything"),
            TypeExpr::Boolean => f.write_str("T::Boolean"),
            TypeExpr::AttachedClass => f.write_str("T.attached_class"),
        }
    }
}

//! Type policies over signature and field types.
//!
//! A [`TypePolicy`] holds an allow list, every pattern of which a type must
//! match, and a deny list, none of which it may match. Patterns are
//! structural by default ([`TypeMatcher`] over the [`TypeExpr`] algebra);
//! [`TypePattern::Text`] matches a regex against the rendered type instead,
//! for policies written against the printed form.

use regex::Regex;
use smol_str::SmolStr;

use super::{Error, ErrorCollector, ValidatorKind};
use crate::model::{Node, Tree, TypeExpr, TypeKind};
use crate::visit::{Visitor, walk_node};

/// A structural predicate on type expressions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeMatcher {
    /// Matches every type.
    Any,
    /// Matches types of one variant.
    Kind(TypeKind),
    /// Matches a class by name, plain or as the base of a generic. A
    /// leading `::` is ignored on both sides.
    Named(SmolStr),
    /// `T.nilable(inner)` where `inner` matches.
    Nilable(Box<TypeMatcher>),
    /// The type or any nested type matches.
    Contains(Box<TypeMatcher>),
    Not(Box<TypeMatcher>),
}

impl TypeMatcher {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        TypeMatcher::Named(name.into())
    }

    pub fn nilable(inner: TypeMatcher) -> Self {
        TypeMatcher::Nilable(Box::new(inner))
    }

    pub fn contains(inner: TypeMatcher) -> Self {
        TypeMatcher::Contains(Box::new(inner))
    }

    pub fn negate(inner: TypeMatcher) -> Self {
        TypeMatcher::Not(Box::new(inner))
    }

    pub fn matches(&self, ty: &TypeExpr) -> bool {
        match self {
            TypeMatcher::Any => true,
            TypeMatcher::Kind(kind) => ty.kind() == *kind,
            TypeMatcher::Named(name) => {
                let wanted = strip_root(name);
                match ty {
                    TypeExpr::Simple(n) | TypeExpr::Generic { base: n, .. } => {
                        strip_root(n) == wanted
                    }
                    _ => false,
                }
            }
            TypeMatcher::Nilable(inner) => {
                matches!(ty, TypeExpr::Nilable(t) if inner.matches(t))
            }
            TypeMatcher::Contains(inner) => ty.any_node(&|t| inner.matches(t)),
            TypeMatcher::Not(inner) => !inner.matches(ty),
        }
    }
}

fn strip_root(name: &str) -> &str {
    name.strip_prefix("::").unwrap_or(name)
}

/// One allow or deny rule.
#[derive(Clone, Debug)]
pub enum TypePattern {
    Structural(TypeMatcher),
    /// A regex searched in the rendered type.
    Text(Regex),
}

impl TypePattern {
    /// A text pattern, compiled from `pattern`.
    pub fn text(pattern: &str) -> Result<Self, regex::Error> {
        Ok(TypePattern::Text(Regex::new(pattern)?))
    }

    pub fn matches(&self, ty: &TypeExpr) -> bool {
        match self {
            TypePattern::Structural(matcher) => matcher.matches(ty),
            TypePattern::Text(regex) => regex.is_match(&ty.to_string()),
        }
    }
}

impl From<TypeMatcher> for TypePattern {
    fn from(matcher: TypeMatcher) -> Self {
        TypePattern::Structural(matcher)
    }
}

/// Allow and deny rules. The default policy accepts every type.
#[derive(Clone, Debug, Default)]
pub struct TypePolicy {
    pub allow: Vec<TypePattern>,
    pub deny: Vec<TypePattern>,
}

impl TypePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(mut self, pattern: impl Into<TypePattern>) -> Self {
        self.allow.push(pattern.into());
        self
    }

    pub fn deny(mut self, pattern: impl Into<TypePattern>) -> Self {
        self.deny.push(pattern.into());
        self
    }

    /// Whether `ty` matches every allow rule and no deny rule.
    pub fn accepts(&self, ty: &TypeExpr) -> bool {
        self.allow.iter().all(|p| p.matches(ty)) && !self.deny.iter().any(|p| p.matches(ty))
    }
}

/// Check every signature parameter, signature return and struct field type
/// in `trees` against `policy`, one error per rejected occurrence.
#[tracing::instrument(skip_all)]
pub fn validate<'a>(
    trees: impl IntoIterator<Item = &'a Tree>,
    policy: &TypePolicy,
) -> (bool, Vec<Error>) {
    let mut validator = TypesValidator {
        policy,
        errors: ErrorCollector::new(),
    };
    for tree in trees {
        validator.visit_tree(tree);
    }
    validator.errors.finish()
}

struct TypesValidator<'p> {
    policy: &'p TypePolicy,
    errors: ErrorCollector,
}

impl TypesValidator<'_> {
    fn check(&mut self, ty: &TypeExpr, node: &Node) {
        if !self.policy.accepts(ty) {
            self.errors.add(Error::at(
                ValidatorKind::Types,
                format!("invalid type `{ty}` for {}", node.kind_name()),
                node,
            ));
        }
    }
}

impl<'a> Visitor<'a> for TypesValidator<'_> {
    fn visit_node(&mut self, node: &'a Node) {
        for sig in node.sigs() {
            for ty in sig.types() {
                self.check(ty, node);
            }
        }
        if let Node::StructField(field) = node {
            self.check(&field.ty, node);
        }
        walk_node(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldKind, Method, Scope, Sig, StructField};

    fn sample() -> Tree {
        Tree::new().with(
            Scope::t_struct("S")
                .with(StructField::new(
                    FieldKind::Prop,
                    "a",
                    TypeExpr::nilable(TypeExpr::Untyped),
                ))
                .with(
                    Method::new("m").with_sig(
                        Sig::new()
                            .param("x", TypeExpr::simple("::Integer"))
                            .returns(TypeExpr::generic("T::Array", [TypeExpr::Untyped])),
                    ),
                ),
        )
    }

    #[test]
    fn test_default_policy_accepts_everything() {
        assert_eq!(validate([&sample()], &TypePolicy::default()), (true, Vec::new()));
    }

    #[test]
    fn test_structural_deny() {
        let policy = TypePolicy::new().deny(TypeMatcher::contains(TypeMatcher::Kind(TypeKind::Untyped)));
        let (ok, errors) = validate([&sample()], &policy);

        assert!(!ok);
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "invalid type `T.nilable(T.untyped)` for TStructProp",
                "invalid type `T::Array[T.untyped]` for Method",
            ]
        );
    }

    #[test]
    fn test_structural_allow() {
        let policy = TypePolicy::new().allow(TypeMatcher::negate(TypeMatcher::nilable(
            TypeMatcher::Kind(TypeKind::Untyped),
        )));
        let (_, errors) = validate([&sample()], &policy);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].node_kind, "TStructProp");
    }

    #[test]
    fn test_named_ignores_root_prefix() {
        let matcher = TypeMatcher::named("Integer");
        assert!(matcher.matches(&TypeExpr::simple("::Integer")));
        assert!(TypeMatcher::named("::T::Array")
            .matches(&TypeExpr::generic("T::Array", [TypeExpr::Untyped])));
        assert!(!matcher.matches(&TypeExpr::simple("String")));
    }

    #[test]
    fn test_text_patterns() {
        let policy = TypePolicy::new()
            .allow(TypePattern::text(r"^[^:]").unwrap())
            .deny(TypePattern::text(r"T\.untyped").unwrap());
        let (_, errors) = validate([&sample()], &policy);

        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "invalid type `T.nilable(T.untyped)` for TStructProp",
                "invalid type `::Integer` for Method",
                "invalid type `T::Array[T.untyped]` for Method",
            ]
        );
        assert!(TypePattern::text("(").is_err());
    }
}

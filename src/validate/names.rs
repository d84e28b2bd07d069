//! Identifier syntax of declaration names.
//!
//! | pattern    | applies to                                              |
//! |------------|---------------------------------------------------------|
//! | constant   | scope, superclass, const, type member, mixin, enum value |
//! | identifier | method (or an operator), struct field, helper           |
//! | parameter  | method and signature parameter, attribute, struct member |

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Error, ErrorCollector, ValidatorKind};
use crate::base::Loc;
use crate::model::{Node, ScopeKind, Tree};
use crate::visit::{Visitor, walk_node};

static CONSTANT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(::)?[A-Z][A-Za-z0-9_]*(::[A-Z][A-Za-z0-9_]*)*$").expect("constant pattern")
});

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*[?!=]?$").expect("identifier pattern"));

static PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][A-Za-z0-9_]*$").expect("parameter pattern"));

/// Method names that are operators rather than identifiers.
const OPERATORS: &[&str] = &[
    "[]", "[]=", "+", "-", "*", "/", "%", "**", "==", "!=", "===", "=~", "!~", "<", ">", "<=",
    ">=", "<=>", "<<", ">>", "&", "|", "^", "~", "!", "+@", "-@",
];

pub fn is_constant_name(name: &str) -> bool {
    CONSTANT.is_match(name)
}

pub fn is_method_name(name: &str) -> bool {
    IDENTIFIER.is_match(name) || OPERATORS.contains(&name)
}

pub fn is_parameter_name(name: &str) -> bool {
    PARAMETER.is_match(name)
}

/// Check every name in `trees`, reporting errors in tree order.
#[tracing::instrument(skip_all)]
pub fn validate<'a>(trees: impl IntoIterator<Item = &'a Tree>) -> (bool, Vec<Error>) {
    let mut validator = NamesValidator::default();
    for tree in trees {
        validator.visit_tree(tree);
    }
    validator.errors.finish()
}

#[derive(Default)]
struct NamesValidator {
    errors: ErrorCollector,
}

impl NamesValidator {
    fn check(&mut self, valid: fn(&str) -> bool, name: &str, kind: &'static str, loc: Option<&Loc>) {
        if !valid(name) {
            self.errors.add(Error::new(
                ValidatorKind::Names,
                format!("invalid name `{name}` for {kind}"),
                kind,
                loc,
            ));
        }
    }
}

impl<'a> Visitor<'a> for NamesValidator {
    fn visit_node(&mut self, node: &'a Node) {
        let kind = node.kind_name();
        let loc = node.loc();
        match node {
            Node::Scope(scope) => {
                if scope.kind != ScopeKind::SingletonClass {
                    self.check(is_constant_name, &scope.name, kind, loc);
                }
                match &scope.kind {
                    ScopeKind::Class {
                        superclass: Some(superclass),
                    } => self.check(is_constant_name, superclass, kind, loc),
                    ScopeKind::Struct { members, .. } => {
                        for member in members {
                            self.check(is_parameter_name, member, kind, loc);
                        }
                    }
                    _ => {}
                }
            }
            Node::Const(c) => self.check(is_constant_name, &c.name, kind, loc),
            Node::TypeMember(member) => self.check(is_constant_name, &member.name, kind, loc),
            Node::Method(method) => {
                self.check(is_method_name, &method.name, kind, loc);
                for param in &method.params {
                    let param_loc = param.loc.as_ref().or(loc);
                    self.check(is_parameter_name, &param.name, param.kind.kind_name(), param_loc);
                }
            }
            Node::Attr(attr) => {
                for name in &attr.names {
                    self.check(is_parameter_name, name, kind, loc);
                }
            }
            Node::Mixin(mixin) => {
                for name in &mixin.names {
                    self.check(is_constant_name, name, kind, loc);
                }
            }
            Node::StructField(field) => self.check(is_method_name, &field.name, kind, loc),
            Node::EnumBlock(block) => {
                for value in &block.values {
                    self.check(is_constant_name, value, kind, loc);
                }
            }
            Node::Helper(helper) => self.check(is_method_name, &helper.name, kind, loc),
        }

        for sig in node.sigs() {
            let sig_loc = sig.loc.as_ref().or(loc);
            for param in &sig.params {
                self.check(is_parameter_name, &param.name, "Sig", sig_loc);
            }
        }

        walk_node(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attr, Const, EnumBlock, Method, Mixin, Param, Scope, Sig, TypeExpr};

    fn messages(tree: &Tree) -> Vec<String> {
        validate([tree]).1.into_iter().map(|e| e.message).collect()
    }

    #[test]
    fn test_module_names() {
        assert_eq!(
            messages(&Tree::new().with(Scope::module(""))),
            vec!["invalid name `` for Module"]
        );
        assert_eq!(
            messages(&Tree::new().with(Scope::module("foo"))),
            vec!["invalid name `foo` for Module"]
        );
        assert!(messages(&Tree::new().with(Scope::module("Foo::Bar::Baz"))).is_empty());
        assert!(messages(&Tree::new().with(Scope::module("::Foo"))).is_empty());
    }

    #[test]
    fn test_nested_errors_in_tree_order() {
        let tree = Tree::new().with(
            Scope::class("A", Some("lower"))
                .with(Const::new("x", "1"))
                .with(Method::new("9lives").with_param(Param::required("Bad")))
                .with(Attr::reader("Name"))
                .with(Mixin::include("mod"))
                .with(Scope::t_enum("E").with(EnumBlock::new(["ok"]))),
        );
        assert_eq!(
            messages(&tree),
            vec![
                "invalid name `lower` for Class",
                "invalid name `x` for Const",
                "invalid name `9lives` for Method",
                "invalid name `Bad` for ReqParam",
                "invalid name `Name` for AttrReader",
                "invalid name `mod` for Include",
                "invalid name `ok` for TEnumBlock",
            ]
        );
    }

    #[test]
    fn test_method_names() {
        for name in ["foo", "foo?", "save!", "name=", "_private", "==", "[]=", "<=>", "-@"] {
            assert!(is_method_name(name), "{name}");
        }
        for name in ["", "1a", "a-b", "foo??"] {
            assert!(!is_method_name(name), "{name}");
        }
    }

    #[test]
    fn test_singleton_class_has_no_name() {
        let tree = Tree::new().with(Scope::module("A").with(Scope::singleton_class()));
        assert!(messages(&tree).is_empty());
    }

    #[test]
    fn test_sig_param_names() {
        let method = Method::new("foo")
            .with_param(Param::required("a"))
            .with_sig(Sig::new().param("A", TypeExpr::Untyped));
        assert_eq!(
            messages(&Tree::new().with(method)),
            vec!["invalid name `A` for Sig"]
        );
    }
}

//! Property-based roundtrip tests between trees and RBI text.
//!
//! Generates arbitrary type expressions and declaration trees and checks
//! that the printed form parses back to something that prints the same.
//!
//! ## Known differences
//!
//! - A sig without a return type prints as `void` and parses back with an
//!   explicit `void` return, so trees are compared through their text.
//! - Locations are not compared: parsed trees have them, generated ones
//!   do not.
#![cfg(feature = "proptest")]

use proptest::prelude::*;
use rbi::model::{
    Attr, Comment, Const, Helper, Method, Mixin, Node, Param, ParamKind, ProcType, Scope, Sig,
    SigParam, Visibility,
};
use rbi::syntax::parse_type_expr;
use rbi::{PrintOptions, Tree, TypeExpr, parse, print};

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

/// Class names, optionally qualified. Never `T` on its own.
fn arb_class_name() -> impl Strategy<Value = String> {
    "(::)?[A-Z][a-z0-9]{1,8}(::[A-Z][a-z0-9]{1,8})?"
}

fn arb_label() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

fn arb_type() -> impl Strategy<Value = TypeExpr> {
    let leaf = prop_oneof![
        arb_class_name().prop_map(TypeExpr::simple),
        Just(TypeExpr::Untyped),
        Just(TypeExpr::Boolean),
        Just(TypeExpr::SelfType),
        Just(TypeExpr::NoReturn),
        Just(TypeExpr::Anything),
        Just(TypeExpr::AttachedClass),
        "[A-Z][a-z]{0,3}".prop_map(TypeExpr::type_parameter),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(TypeExpr::nilable),
            inner.clone().prop_map(TypeExpr::class_of),
            prop::collection::vec(inner.clone(), 2..4).prop_map(TypeExpr::Union),
            prop::collection::vec(inner.clone(), 2..4).prop_map(TypeExpr::Intersection),
            prop::collection::vec(inner.clone(), 0..3).prop_map(TypeExpr::Tuple),
            (arb_class_name(), prop::collection::vec(inner.clone(), 1..3))
                .prop_map(|(base, args)| TypeExpr::generic(base, args)),
            prop::collection::vec((arb_label(), inner.clone()), 0..3).prop_map(TypeExpr::shape),
            (
                prop::collection::vec((arb_label(), inner.clone()), 0..3),
                prop::option::of(inner.clone()),
                prop::option::of(inner),
            )
                .prop_map(|(params, returns, bind)| {
                    let mut proc_type = ProcType::new();
                    for (name, ty) in params {
                        proc_type = proc_type.param(name, ty);
                    }
                    if let Some(returns) = returns {
                        proc_type = proc_type.returns(returns);
                    }
                    if let Some(bind) = bind {
                        proc_type = proc_type.bind(bind);
                    }
                    TypeExpr::Proc(proc_type)
                }),
        ]
    })
}

fn arb_comments() -> impl Strategy<Value = Vec<Comment>> {
    prop::collection::vec("[a-zA-Z0-9 :]{0,16}".prop_map(Comment::new), 0..2)
}

fn arb_param_kind() -> impl Strategy<Value = ParamKind> {
    prop_oneof![
        Just(ParamKind::Required),
        Just(ParamKind::Optional {
            default: "nil".to_string()
        }),
        Just(ParamKind::Rest),
        Just(ParamKind::Keyword),
        Just(ParamKind::KeywordOptional {
            default: "[1, 2]".to_string()
        }),
        Just(ParamKind::KeywordRest),
        Just(ParamKind::Block),
    ]
}

fn arb_method() -> impl Strategy<Value = Node> {
    (
        arb_label(),
        prop::collection::vec(arb_param_kind(), 0..4),
        prop::collection::vec((prop::collection::vec(arb_type(), 0..4), prop::option::of(arb_type())), 0..2),
        any::<bool>(),
        any::<bool>(),
        arb_comments(),
    )
        .prop_map(|(name, kinds, sigs, is_singleton, is_private, comments)| {
            let mut method = Method::new(name);
            for (i, kind) in kinds.into_iter().enumerate() {
                method.add_param(Param::new(format!("p{i}"), kind));
            }
            for (types, returns) in sigs {
                let mut sig = Sig::new();
                sig.params = types
                    .into_iter()
                    .enumerate()
                    .map(|(i, ty)| SigParam::new(format!("p{i}"), ty))
                    .collect();
                sig.return_type = Some(returns.unwrap_or(TypeExpr::Void));
                method.add_sig(sig);
            }
            method.is_singleton = is_singleton;
            if is_private {
                method.visibility = Visibility::Private;
            }
            method.comments = comments;
            method.into()
        })
}

fn arb_leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        3 => arb_method(),
        1 => ("[A-Z][A-Z0-9_]{0,6}", "[0-9]{1,4}")
            .prop_map(|(name, value)| Const::new(name, value).into()),
        1 => prop::collection::vec(arb_label(), 1..3)
            .prop_map(|names| Attr::new(rbi::model::AttrKind::Reader, names).into()),
        1 => arb_class_name().prop_map(|name| Mixin::include(name).into()),
        1 => prop_oneof![Just("abstract"), Just("sealed"), Just("interface")]
            .prop_map(|name| Helper::new(name).into()),
    ]
}

fn arb_node() -> impl Strategy<Value = Node> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        (
            "[A-Z][a-z0-9]{1,8}",
            prop::option::of(arb_class_name()),
            any::<bool>(),
            prop::collection::vec(inner, 0..4),
            arb_comments(),
        )
            .prop_map(|(name, superclass, is_class, nodes, comments)| {
                let mut scope = if is_class {
                    Scope::class(name, superclass.as_deref())
                } else {
                    Scope::module(name)
                };
                scope.nodes = nodes;
                scope.comments = comments;
                scope.into()
            })
    })
}

fn arb_tree() -> impl Strategy<Value = Tree> {
    (arb_comments(), prop::collection::vec(arb_node(), 0..4)).prop_map(|(comments, nodes)| Tree {
        comments,
        nodes,
        loc: None,
    })
}

fn arb_options() -> impl Strategy<Value = PrintOptions> {
    (1usize..5, any::<bool>(), any::<bool>(), prop::option::of(20usize..120)).prop_map(
        |(indent, between, edges, max)| {
            let options = PrintOptions::default()
                .with_indent(indent)
                .with_blank_lines_between(between)
                .with_blank_lines_at_scope_edges(edges);
            match max {
                Some(max) => options.with_max_line_length(max),
                None => options,
            }
        },
    )
}

// ============================================================================
// HELPERS
// ============================================================================

fn reprint(text: &str, options: &PrintOptions) -> Result<String, TestCaseError> {
    let tree = parse(text).map_err(|err| TestCaseError::fail(format!("{err}\n---\n{text}")))?;
    Ok(print(&tree, options))
}

// ============================================================================
// TYPE EXPRESSIONS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn type_text_roundtrip(ty in arb_type()) {
        let text = ty.to_string();
        let parsed = parse_type_expr(&text);
        prop_assert_eq!(parsed.as_ref().ok(), Some(&ty), "{}", text);
    }
}

// ============================================================================
// TREES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn print_parse_print_stable(tree in arb_tree()) {
        let options = PrintOptions::default();
        let text = print(&tree, &options);
        prop_assert_eq!(reprint(&text, &options)?, text);
    }

    #[test]
    fn print_parse_print_stable_with_options(tree in arb_tree(), options in arb_options()) {
        let text = print(&tree, &options);
        prop_assert_eq!(reprint(&text, &options)?, text);
    }

    #[test]
    fn printed_locations_still_parse(tree in arb_tree()) {
        let plain = PrintOptions::default();
        let first = reprint(&print(&tree, &plain), &plain)?;
        let with_locs = print(&parse(&first).unwrap(), &plain.clone().with_locs(true));
        prop_assert_eq!(reprint(&with_locs, &plain)?, first);
    }
}

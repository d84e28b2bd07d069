//! RBI source text to declaration trees.
//!
//! [`parse`] reads one file. [`parse_files`] parses independent files in
//! parallel. Every node gets a [`Loc`](crate::base::Loc); with
//! [`parse_file`] each one is tagged with the file name.
//!
//! The accepted language is the subset of Ruby that RBI files use, which
//! includes everything the [printer](crate::printer) emits.

mod lexer;
mod parser;
mod sig;

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{Tree, TypeExpr};
use parser::Parser;

/// Parse RBI source text.
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn parse(text: &str) -> Result<Tree> {
    let tree = Parser::new(text, None)?.parse_tree()?;
    tracing::debug!(nodes = tree.nodes.len(), "parsed");
    Ok(tree)
}

/// Parse the contents of `path`. Locations in the tree and in the error
/// carry the path.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn parse_file(text: &str, path: &str) -> Result<Tree> {
    let tree = Parser::new(text, Some(path))?.parse_tree()?;
    tracing::debug!(nodes = tree.nodes.len(), "parsed");
    Ok(tree)
}

/// Parse `(path, text)` pairs in parallel. Results come back in input
/// order, one per file.
pub fn parse_files<P, S>(files: &[(P, S)]) -> Vec<Result<Tree>>
where
    P: AsRef<str> + Sync,
    S: AsRef<str> + Sync,
{
    files
        .par_iter()
        .map(|(path, text)| parse_file(text.as_ref(), path.as_ref()))
        .collect()
}

/// Parse a single Sorbet type expression such as `T.nilable(Integer)`.
pub fn parse_type_expr(text: &str) -> Result<TypeExpr> {
    let mut parser = Parser::new(text, None)?;
    parser.multiline += 1;
    let ty = parser.type_expr()?;
    if parser.peek().is_some() {
        return Err(parser.unexpected("end of type"));
    }
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AttrKind, FieldKind, MixinKind, Node, ParamKind, ProcType, ScopeKind, Visibility,
    };

    fn only(tree: &Tree) -> &Node {
        assert_eq!(tree.nodes.len(), 1, "{tree:?}");
        &tree.nodes[0]
    }

    #[test]
    fn test_empty_file() {
        let tree = parse("").unwrap();
        assert!(tree.is_empty());
        assert!(tree.comments.is_empty());
    }

    #[test]
    fn test_nested_scopes() {
        let tree = parse("module A\n  class B < ::C; end\n  class << self; end\nend\n").unwrap();
        let Node::Scope(a) = only(&tree) else { panic!() };
        assert_eq!(a.name, "A");
        assert_eq!(a.kind, ScopeKind::Module);
        let kinds: Vec<&ScopeKind> = a
            .nodes
            .iter()
            .map(|n| match n {
                Node::Scope(s) => &s.kind,
                _ => panic!(),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                &ScopeKind::Class {
                    superclass: Some("::C".into())
                },
                &ScopeKind::SingletonClass,
            ]
        );
    }

    #[test]
    fn test_method_params() {
        let tree =
            parse("private def self.foo(a, b = [1, 2], *c, d:, e: nil, **f, &g); end").unwrap();
        let Node::Method(m) = only(&tree) else { panic!() };
        assert!(m.is_singleton);
        assert_eq!(m.visibility, Visibility::Private);
        let params: Vec<(&str, &ParamKind)> =
            m.params.iter().map(|p| (p.name.as_str(), &p.kind)).collect();
        assert_eq!(
            params,
            vec![
                ("a", &ParamKind::Required),
                (
                    "b",
                    &ParamKind::Optional {
                        default: "[1, 2]".into()
                    }
                ),
                ("c", &ParamKind::Rest),
                ("d", &ParamKind::Keyword),
                (
                    "e",
                    &ParamKind::KeywordOptional {
                        default: "nil".into()
                    }
                ),
                ("f", &ParamKind::KeywordRest),
                ("g", &ParamKind::Block),
            ]
        );
    }

    #[test]
    fn test_operator_and_setter_names() {
        let tree = parse("def []=(k, v); end\ndef name=(v); end\ndef <=>(o); end\ndef -@; end")
            .unwrap();
        let names: Vec<&str> = tree
            .nodes
            .iter()
            .map(|n| match n {
                Node::Method(m) => m.name.as_str(),
                _ => panic!(),
            })
            .collect();
        assert_eq!(names, vec!["[]=", "name=", "<=>", "-@"]);
    }

    #[test]
    fn test_sigs_attach_to_next_method() {
        let text = "sig { params(x: Integer).returns(String) }\n\
                    sig { params(x: String).void }\n\
                    def foo(x); end\n";
        let tree = parse(text).unwrap();
        let Node::Method(m) = only(&tree) else { panic!() };
        assert_eq!(m.sigs.len(), 2);
        assert_eq!(m.sigs[0].return_type, Some(TypeExpr::simple("String")));
        assert_eq!(m.sigs[1].return_type, Some(TypeExpr::Void));
        assert_eq!(m.sigs[1].params[0].ty, TypeExpr::simple("String"));
    }

    #[test]
    fn test_sig_modifiers() {
        let text = "sig(:final) { abstract.override(allow_incompatible: true).overridable\
                    .type_parameters(:U, :V).bind(Foo).returns(T.type_parameter(:U)) }\n\
                    def foo; end";
        let tree = parse(text).unwrap();
        let sig = &only(&tree).sigs()[0];
        assert!(sig.flags.is_final);
        assert!(sig.flags.is_abstract);
        assert!(sig.flags.is_override);
        assert!(sig.flags.allow_incompatible_override);
        assert!(sig.flags.is_overridable);
        assert_eq!(sig.type_params, vec!["U", "V"]);
        assert_eq!(sig.bind, Some(TypeExpr::simple("Foo")));
        assert_eq!(sig.return_type, Some(TypeExpr::type_parameter("U")));
    }

    #[test]
    fn test_multiline_sig() {
        let text = "sig do\n  params(\n    a: Integer,\n    b: String\n  ).void\nend\ndef foo(a, b); end\n";
        let tree = parse(text).unwrap();
        let sig = &only(&tree).sigs()[0];
        assert_eq!(sig.params.len(), 2);
        assert_eq!(sig.params[1].name, "b");
    }

    #[test]
    fn test_dangling_sig_is_an_error() {
        let err = parse("sig { void }\nX = 1\n").unwrap_err();
        assert!(err.message.contains("signature"), "{err}");
        assert_eq!(err.loc.start.line, 0);
        assert!(parse("sig { void }\n").is_err());
    }

    #[test]
    fn test_sorbet_types() {
        let cases = [
            ("T.nilable(Integer)", TypeExpr::nilable(TypeExpr::simple("Integer"))),
            (
                "T.any(Integer, ::Foo::Bar)",
                TypeExpr::any([TypeExpr::simple("Integer"), TypeExpr::simple("::Foo::Bar")]),
            ),
            (
                "T::Hash[Symbol, T.untyped]",
                TypeExpr::generic("T::Hash", [TypeExpr::simple("Symbol"), TypeExpr::Untyped]),
            ),
            ("T::Boolean", TypeExpr::Boolean),
            ("T.class_of(Foo)", TypeExpr::class_of(TypeExpr::simple("Foo"))),
            ("[Integer, String]", TypeExpr::tuple([TypeExpr::simple("Integer"), TypeExpr::simple("String")])),
            ("{}", TypeExpr::shape(Vec::<(&str, TypeExpr)>::new())),
            (
                r#"{ a: Integer, "b c": T.self_type }"#,
                TypeExpr::shape([("a", TypeExpr::simple("Integer")), ("b c", TypeExpr::SelfType)]),
            ),
            (
                "T.proc.bind(Foo).params(x: Integer).returns(String)",
                TypeExpr::Proc(
                    ProcType::new()
                        .bind(TypeExpr::simple("Foo"))
                        .param("x", TypeExpr::simple("Integer"))
                        .returns(TypeExpr::simple("String")),
                ),
            ),
            ("T.proc.void", TypeExpr::Proc(ProcType::new())),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_type_expr(text).unwrap(), expected, "{text}");
        }
        assert!(parse_type_expr("T.bogus").is_err());
        assert!(parse_type_expr("Integer Integer").is_err());
    }

    #[test]
    fn test_struct_and_enum_forms() {
        let text = "S = ::Struct.new(:a, :b, keyword_init: true) do\n  def c; end\nend\n\
                    class P < T::Struct\n  const :x, Integer\n  prop :y, T.nilable(String), default: nil\nend\n\
                    class E < T::Enum\n  enums do\n    Red = new\n    Blue = new\n  end\nend\n";
        let tree = parse(text).unwrap();
        assert_eq!(tree.nodes.len(), 3);

        let Node::Scope(s) = &tree.nodes[0] else { panic!() };
        assert_eq!(
            s.kind,
            ScopeKind::Struct {
                members: vec!["a".into(), "b".into()],
                keyword_init: true
            }
        );
        assert_eq!(s.nodes.len(), 1);

        let Node::Scope(p) = &tree.nodes[1] else { panic!() };
        assert_eq!(p.kind, ScopeKind::TStruct);
        let Node::StructField(y) = &p.nodes[1] else { panic!() };
        assert_eq!(y.kind, FieldKind::Prop);
        assert_eq!(y.default.as_deref(), Some("nil"));

        let Node::Scope(e) = &tree.nodes[2] else { panic!() };
        let Node::EnumBlock(block) = &e.nodes[0] else { panic!() };
        assert_eq!(block.values, vec!["Red", "Blue"]);
    }

    #[test]
    fn test_misc_declarations() {
        let text = "class A\n  abstract!\n  include B, ::C\n  extend T::Sig\n  \
                    attr_accessor :x, :y\n  Elem = type_member { { fixed: Integer } }\n  \
                    X = T.let(1, Integer)\nend\n";
        let tree = parse(text).unwrap();
        let Node::Scope(a) = only(&tree) else { panic!() };
        let kinds: Vec<&str> = a.nodes.iter().map(Node::kind_name).collect();
        assert_eq!(
            kinds,
            vec!["Helper", "Include", "Extend", "AttrAccessor", "TypeMember", "Const"]
        );
        match &a.nodes[1] {
            Node::Mixin(m) => {
                assert_eq!(m.kind, MixinKind::Include);
                assert_eq!(m.names, vec!["B", "::C"]);
            }
            _ => panic!(),
        }
        match &a.nodes[3] {
            Node::Attr(attr) => assert_eq!(attr.kind, AttrKind::Accessor),
            _ => panic!(),
        }
        match &a.nodes[4] {
            Node::TypeMember(m) => assert_eq!(m.value, "type_member { { fixed: Integer } }"),
            _ => panic!(),
        }
        match &a.nodes[5] {
            Node::Const(c) => assert_eq!(c.value, "T.let(1, Integer)"),
            _ => panic!(),
        }
    }

    #[test]
    fn test_visibility_sections() {
        let tree = parse("class A\n  def a; end\n  private\n  def b; end\n  attr_reader :c\nend").unwrap();
        let Node::Scope(a) = only(&tree) else { panic!() };
        let visibilities: Vec<Visibility> = a
            .nodes
            .iter()
            .map(|n| match n {
                Node::Method(m) => m.visibility,
                Node::Attr(attr) => attr.visibility,
                _ => panic!(),
            })
            .collect();
        assert_eq!(
            visibilities,
            vec![Visibility::Public, Visibility::Private, Visibility::Private]
        );
    }

    #[test]
    fn test_comments() {
        let text = "# typed: strict\n\n# Doc for A\nmodule A # 1:0-1:13\n  # Doc for foo\n  def foo; end\nend\n";
        let tree = parse(text).unwrap();
        assert_eq!(tree.comments.len(), 1);
        assert_eq!(tree.comments[0].text, "typed: strict");

        let a = only(&tree);
        assert_eq!(a.comments()[0].text, "Doc for A");
        assert_eq!(a.children()[0].comments()[0].text, "Doc for foo");
    }

    #[test]
    fn test_comment_only_file() {
        let tree = parse("# typed: true\n").unwrap();
        assert_eq!(tree.comments.len(), 1);
        assert!(tree.nodes.is_empty());
    }

    #[test]
    fn test_locations() {
        let tree = parse_file("module A\n  def foo; end\nend\n", "a.rbi").unwrap();
        let a = only(&tree);
        assert_eq!(a.loc().unwrap().to_string(), "a.rbi:1:0-3:3");
        assert_eq!(a.children()[0].loc().unwrap().to_string(), "a.rbi:2:2-2:14");
    }

    #[test]
    fn test_syntax_errors() {
        let err = parse("module A\n  def foo(\n").unwrap_err();
        assert!(err.message.contains("expected"), "{err}");

        let err = parse_file("module a; end", "bad.rbi").unwrap_err();
        assert_eq!(err.loc.file.as_deref(), Some("bad.rbi"));
        assert_eq!(err.loc.start.col, 7);

        assert!(parse("end").is_err());
        assert!(parse("module A\n").is_err());
        assert!(parse("class A\n  `x`\nend").is_err());
    }

    #[test]
    fn test_deep_types_are_an_error() {
        let deep = format!("{}Integer{}", "T.nilable(".repeat(50_000), ")".repeat(50_000));
        let err = parse_type_expr(&deep).unwrap_err();
        assert_eq!(err.message, "type is nested too deeply");
        assert_eq!(err.loc.start.col, 2560);

        let text = format!("sig {{ returns({}) }}\ndef foo; end\n", "[".repeat(50_000));
        let err = parse(&text).unwrap_err();
        assert_eq!(err.message, "type is nested too deeply");

        let shallow = format!("{}Integer{}", "T.nilable(".repeat(100), ")".repeat(100));
        assert!(parse_type_expr(&shallow).is_ok());

        let scopes = "module A\n".repeat(50_000);
        let err = parse(&scopes).unwrap_err();
        assert_eq!(err.message, "scope is nested too deeply");
        assert_eq!(err.loc.start.line, 256);
    }

    #[test]
    fn test_parse_files_keeps_order() {
        let files = [("a.rbi", "module A; end"), ("b.rbi", "module"), ("c.rbi", "class C; end")];
        let results = parse_files(&files);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert_eq!(
            results[1].as_ref().unwrap_err().loc.file.as_deref(),
            Some("b.rbi")
        );
        let Node::Scope(c) = &results[2].as_ref().unwrap().nodes[0] else { panic!() };
        assert_eq!(c.name, "C");
    }
}

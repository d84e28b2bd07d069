//! Print / parse roundtrips over fixture files and hand-built trees.

use std::path::{Path, PathBuf};

use rbi::model::{
    Attr, Const, EnumBlock, FieldKind, Helper, Method, Mixin, Node, Param, Scope, Sig, SigFlags,
    StructField, TypeMember, Visibility,
};
use rbi::{Index, PrintOptions, Tree, TypeExpr, parse, parse_files, print};
use rstest::rstest;
use walkdir::WalkDir;

fn fixtures() -> Vec<PathBuf> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let mut paths: Vec<PathBuf> = WalkDir::new(&root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("rbi"))
        .collect();
    paths.sort();
    paths
}

fn sample_tree() -> Tree {
    Tree::new().with_comment("typed: strict").with(
        Scope::module("Shop")
            .with(Helper::new("abstract"))
            .with(TypeMember::new("Elem", "type_member"))
            .with(Mixin::extend("T::Sig"))
            .with(
                Scope::class("Cart", Some("::Base"))
                    .with_comment("A shopping cart.")
                    .with(Const::new("LIMIT", "10"))
                    .with(
                        Attr::accessor("items").with_sig(
                            Sig::new().returns(TypeExpr::generic("T::Array", [TypeExpr::simple("Item")])),
                        ),
                    )
                    .with(
                        Method::new("add")
                            .with_param(Param::required("item"))
                            .with_param(Param::keyword_optional("quantity", "1"))
                            .with_param(Param::block("blk"))
                            .with_sig(
                                Sig::new()
                                    .param("item", TypeExpr::simple("Item"))
                                    .param("quantity", TypeExpr::simple("Integer"))
                                    .param(
                                        "blk",
                                        TypeExpr::nilable(TypeExpr::Proc(Default::default())),
                                    )
                                    .returns(TypeExpr::SelfType)
                                    .with_flags(SigFlags {
                                        is_override: true,
                                        ..Default::default()
                                    }),
                            ),
                    )
                    .with(Method::new("clear").with_visibility(Visibility::Private)),
            )
            .with(
                Scope::t_struct("Item")
                    .with(StructField::new(FieldKind::Const, "sku", TypeExpr::simple("String")))
                    .with(
                        StructField::new(FieldKind::Prop, "price", TypeExpr::simple("Float"))
                            .with_default("0.0"),
                    ),
            )
            .with(Scope::t_enum("State").with(EnumBlock::new(["Open", "Closed"])))
            .with(Scope::struct_class("Pair", ["a", "b"], false)),
    )
}

#[test]
fn test_fixtures_are_canonical() {
    let paths = fixtures();
    assert!(!paths.is_empty(), "no fixtures found");
    for path in paths {
        let text = std::fs::read_to_string(&path).unwrap();
        let tree = parse(&text).unwrap_or_else(|err| panic!("{}: {err}", path.display()));
        assert_eq!(print(&tree, &PrintOptions::default()), text, "{}", path.display());
    }
}

#[test]
fn test_fixtures_parse_in_parallel() {
    let files: Vec<(String, String)> = fixtures()
        .into_iter()
        .map(|p| {
            let text = std::fs::read_to_string(&p).unwrap();
            (p.display().to_string(), text)
        })
        .collect();
    let trees: Vec<Tree> = parse_files(&files)
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    // Locations carry their file, so the index tells fixtures apart.
    let index = Index::build(&trees);
    let bar = index.get("Foo::Bar").unwrap();
    assert!(bar[0].loc().unwrap().file.as_deref().unwrap().ends_with("basic.rbi"));
    assert!(index.get("Foo::Bar.build").is_some());
    assert!(index.get("Container#check").is_some());
    assert!(index.get("Point#label=").is_some());
}

#[rstest]
#[case::default(PrintOptions::default())]
#[case::wide_indent(PrintOptions::default().with_indent(4))]
#[case::compact(PrintOptions::default().with_blank_lines_between(false))]
#[case::scope_edges(PrintOptions::default().with_blank_lines_at_scope_edges(true))]
#[case::locations(PrintOptions::default().with_locs(true))]
#[case::short_lines(PrintOptions::default().with_max_line_length(30))]
fn test_print_parse_print(#[case] options: PrintOptions) {
    // Built trees have no locations; go through the parser once so that
    // both sides print the same ones.
    let first = print(&sample_tree(), &options);
    let parsed = parse(&first).unwrap_or_else(|err| panic!("{err}\n{first}"));
    let text = print(&parsed, &options);
    let reparsed = parse(&text).unwrap_or_else(|err| panic!("{err}\n{text}"));
    assert_eq!(print(&reparsed, &options), text);
    if !options.print_locs {
        assert_eq!(text, first);
    }
}

#[test]
fn test_parsed_tree_matches_built_tree() {
    let text = print(&sample_tree(), &PrintOptions::default());
    let parsed = parse(&text).unwrap();

    let shop = &parsed.nodes[0];
    let kinds: Vec<&str> = shop.children().iter().map(Node::kind_name).collect();
    assert_eq!(
        kinds,
        vec!["Helper", "TypeMember", "Extend", "Class", "TStruct", "TEnum", "Struct"]
    );
    assert_eq!(parsed.comments[0].text, "typed: strict");
    assert_eq!(shop.children()[3].comments()[0].text, "A shopping cart.");

    let Node::Scope(cart) = &shop.children()[3] else {
        panic!("expected Cart")
    };
    let Node::Method(add) = &cart.nodes[2] else {
        panic!("expected add")
    };
    assert!(add.sigs[0].flags.is_override);
    assert_eq!(
        add.sigs[0].params[2].ty,
        TypeExpr::nilable(TypeExpr::Proc(Default::default()))
    );
}

#[test]
fn test_multiline_sig_output() {
    let tree = Tree::new().with(
        Method::new("foo")
            .with_param(Param::required("a"))
            .with_param(Param::required("b"))
            .with_sig(
                Sig::new()
                    .param("a", TypeExpr::simple("Integer"))
                    .param("b", TypeExpr::nilable(TypeExpr::simple("String")))
                    .returns(TypeExpr::Boolean),
            ),
    );
    let options = PrintOptions::default().with_max_line_length(40);
    let text = print(&tree, &options);
    assert_eq!(
        text,
        "sig do\n  params(\n    a: Integer,\n    b: T.nilable(String)\n  ).returns(T::Boolean)\nend\ndef foo(a, b); end\n"
    );
    let reprinted = print(&parse(&text).unwrap(), &PrintOptions::default());
    assert_eq!(
        reprinted.lines().next(),
        Some("sig { params(a: Integer, b: T.nilable(String)).returns(T::Boolean) }")
    );
}

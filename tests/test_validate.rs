//! Validators over parsed RBI files.

use rbi::model::TypeKind;
use rbi::validate::{self, TypeMatcher, TypePattern, TypePolicy, ValidatorKind};
use rbi::{Tree, parse_file};
use rstest::rstest;

fn tree(path: &str, text: &str) -> Tree {
    parse_file(text, path).unwrap_or_else(|err| panic!("{err}"))
}

#[rstest]
#[case::reopened_module(&["module A; end", "module A; end"], &[])]
#[case::method_in_two_files(
    &["module A\n  def foo; end\nend", "module A\n  def foo; end\nend"],
    &["Duplicate definitions for `foo`"]
)]
#[case::singleton_vs_instance(&["class A\n  def self.foo; end\n  def foo; end\nend"], &[])]
#[case::singleton_class_vs_self(
    &["class A\n  def self.foo; end\n  class << self\n    def foo; end\n  end\nend"],
    &["Duplicate definitions for `foo`"]
)]
#[case::writer_vs_setter(
    &["class A\n  attr_writer :x\n  def x=(v); end\nend"],
    &["Duplicate definitions for `x=`"]
)]
#[case::constants(&["X = 1\nY = 2", "X = 3"], &["Duplicate definitions for `X`"])]
#[case::prop_accessors(
    &["class P < T::Struct\n  prop :a, Integer\n  def a=(v); end\nend"],
    &["Duplicate definitions for `a=`"]
)]
#[case::accessor_twice(
    &["class A\n  attr_accessor :a\n  attr_accessor :a\nend"],
    &["Duplicate definitions for `a`", "Duplicate definitions for `a=`"]
)]
#[case::constant_vs_class(&["X = 1", "class X; end"], &["Duplicate definitions for `X`"])]
#[case::constant_vs_reopened_module(
    &["module M; end\nmodule M; end", "M = 1"],
    &["Duplicate definitions for `M`"]
)]
fn test_duplicates(#[case] files: &[&str], #[case] expected: &[&str]) {
    let trees: Vec<Tree> = files
        .iter()
        .enumerate()
        .map(|(i, text)| tree(&format!("f{i}.rbi"), text))
        .collect();
    let (ok, errors) = validate::duplicates::validate(&trees);
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, expected);
    assert_eq!(ok, expected.is_empty());
}

#[test]
fn test_duplicate_sections_point_at_each_file() {
    let a = tree("a.rbi", "module A\n  def foo; end\nend\n");
    let b = tree("b.rbi", "\n\nmodule A\n  def foo; end\nend\n");
    let (_, errors) = validate::duplicates::validate([&a, &b]);

    assert_eq!(errors[0].to_string(), "a.rbi:2:2-2:14: Duplicate definitions for `foo`");
    let sections: Vec<String> = errors[0]
        .sections
        .iter()
        .map(|s| s.loc.as_ref().unwrap().to_string())
        .collect();
    assert_eq!(sections, vec!["a.rbi:2:2-2:14", "b.rbi:4:2-4:14"]);
}

#[test]
fn test_operator_methods_are_valid_names() {
    let parsed = tree("a.rbi", "class A\n  def ==(o); end\n  def []=(k, v); end\n  def -@; end\nend\n");
    assert_eq!(validate::names::validate([&parsed]), (true, Vec::new()));
}

#[rstest]
#[case::lowercase_module("module A\n  module b; end\nend")]
#[case::constant_param("def foo(A); end")]
fn test_bad_names_do_not_parse(#[case] text: &str) {
    assert!(rbi::parse(text).is_err());
}

#[test]
fn test_names_in_parsed_struct() {
    // `Struct` members are symbols, so any identifier parses.
    let parsed = tree("s.rbi", "S = ::Struct.new(:ok, :Bad)\nX = 1\n");
    let (ok, errors) = validate::names::validate([&parsed]);
    assert!(!ok);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "invalid name `Bad` for Struct");
    assert_eq!(errors[0].validator.code(), validate::codes::INVALID_NAME);
}

const TYPED: &str = "class A < T::Struct
  prop :a, T.nilable(T.untyped)
  const :b, T::Array[String]

  sig { params(x: ::Integer, y: T.untyped).returns(T::Hash[Symbol, String]) }
  def foo(x, y); end
end
";

#[rstest]
#[case::default_accepts_all(TypePolicy::default(), &[])]
#[case::deny_untyped_anywhere(
    TypePolicy::new().deny(TypeMatcher::contains(TypeMatcher::Kind(TypeKind::Untyped))),
    &["T.nilable(T.untyped)", "T.untyped"]
)]
#[case::deny_named_class(
    TypePolicy::new().deny(TypeMatcher::named("Integer")),
    &["::Integer"]
)]
#[case::allow_only_non_nilable(
    TypePolicy::new().allow(TypeMatcher::negate(TypeMatcher::Kind(TypeKind::Nilable))),
    &["T.nilable(T.untyped)"]
)]
#[case::text_pattern(
    TypePolicy::new().deny(TypePattern::text(r"^T::(Array|Hash)\[").unwrap()),
    &["T::Array[String]", "T::Hash[Symbol, String]"]
)]
fn test_type_policies(#[case] policy: TypePolicy, #[case] rejected: &[&str]) {
    let parsed = tree("t.rbi", TYPED);
    let (ok, errors) = validate::types::validate([&parsed], &policy);
    let expected: Vec<String> = rejected
        .iter()
        .map(|ty| {
            let kind = match *ty {
                "T.nilable(T.untyped)" => "TStructProp",
                "T::Array[String]" => "TStructConst",
                _ => "Method",
            };
            format!("invalid type `{ty}` for {kind}")
        })
        .collect();
    let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
    assert_eq!(messages, expected);
    assert_eq!(ok, rejected.is_empty());
}

#[test]
fn test_validate_all_runs_every_validator() {
    let a = tree("a.rbi", "module A\n  def foo; end\n  def foo; end\n  S = ::Struct.new(:Bad)\nend\n");
    let policy = TypePolicy::new().deny(TypeMatcher::Any);
    let (ok, errors) = validate::validate_all(&[a], &policy);
    assert!(!ok);
    let kinds: Vec<ValidatorKind> = errors.iter().map(|e| e.validator).collect();
    assert_eq!(kinds, vec![ValidatorKind::Duplicates, ValidatorKind::Names]);
}

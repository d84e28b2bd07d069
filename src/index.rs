//! Declaration index mapping fully-qualified name to defining nodes.
//!
//! The index is built by walking one or more trees. Each node that binds a
//! name gets a key made of its enclosing scope names joined with `::`, then
//! a separator and its own name:
//!
//! | binding                      | key                 |
//! |------------------------------|---------------------|
//! | scope, const, type member    | `A::B`              |
//! | `T::Enum` value              | `A::Color::Red`     |
//! | instance method / attribute  | `A#foo`, `A#foo=`   |
//! | singleton method             | `A.foo`             |
//! | `T::Struct` field            | `A#field`           |
//!
//! Root-level bindings use the bare name. Names starting with `::` are
//! absolute and ignore the enclosing scopes. Methods inside `class << self`
//! are keyed as singleton methods of the enclosing scope; the singleton
//! class itself binds nothing.
//!
//! Keys keep first-seen order and each entry list keeps discovery order
//! (depth-first, tree order), so rebuilding from the same trees gives the
//! same index.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

use crate::base::Loc;
use crate::model::{Attr, AttrKind, FieldKind, Node, ScopeKind, Tree};
use crate::visit::{Visitor, walk_node};

/// One binding of a name.
#[derive(Clone, Debug)]
pub struct IndexEntry<'a> {
    /// The bound method or constant name (`foo`, `Red`, `name=` for a
    /// writer).
    pub name: SmolStr,
    /// The node that introduces the binding.
    pub node: &'a Node,
}

impl<'a> IndexEntry<'a> {
    pub fn loc(&self) -> Option<&'a Loc> {
        self.node.loc()
    }
}

/// An index of all bindings across a set of trees.
#[derive(Clone, Debug, Default)]
pub struct Index<'a> {
    entries: IndexMap<SmolStr, Vec<IndexEntry<'a>>, FxBuildHasher>,
}

impl<'a> Index<'a> {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over the given trees.
    #[tracing::instrument(skip_all)]
    pub fn build(trees: impl IntoIterator<Item = &'a Tree>) -> Self {
        let mut index = Self::new();
        for tree in trees {
            index.add_tree(tree);
        }
        tracing::debug!(keys = index.len(), "built declaration index");
        index
    }

    /// Add every binding of a tree to the index.
    pub fn add_tree(&mut self, tree: &'a Tree) {
        let mut builder = IndexBuilder {
            index: self,
            scopes: Vec::new(),
        };
        builder.visit_tree(tree);
    }

    /// Look up the bindings of a fully-qualified name.
    pub fn get(&self, key: &str) -> Option<&[IndexEntry<'a>]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Iterate over keys and their bindings, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[IndexEntry<'a>])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Iterate over keys, in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(SmolStr::as_str)
    }

    /// Keys bound more than once, with all their bindings.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &[IndexEntry<'a>])> {
        self.iter().filter(|(_, entries)| entries.len() > 1)
    }

    /// Get the number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: SmolStr, entry: IndexEntry<'a>) {
        tracing::trace!(%key, kind = entry.node.kind_name(), "index binding");
        self.entries.entry(key).or_default().push(entry);
    }
}

/// One level of the scope chain seen during the walk.
struct Frame {
    /// Qualified name of the scope (empty for the root).
    prefix: String,
    /// Methods defined here are singleton methods of `prefix`.
    singleton: bool,
}

struct IndexBuilder<'i, 'a> {
    index: &'i mut Index<'a>,
    scopes: Vec<Frame>,
}

impl<'a> IndexBuilder<'_, 'a> {
    fn prefix(&self) -> &str {
        self.scopes.last().map(|f| f.prefix.as_str()).unwrap_or("")
    }

    fn in_singleton(&self) -> bool {
        self.scopes.last().is_some_and(|f| f.singleton)
    }

    /// `A::B` style key for a constant-like name.
    fn const_key(&self, name: &str) -> String {
        if let Some(absolute) = name.strip_prefix("::") {
            return absolute.to_string();
        }
        join(self.prefix(), "::", name)
    }

    /// `A#foo` / `A.foo` style key for a method-like name.
    fn method_key(&self, name: &str, singleton: bool) -> String {
        let sep = if singleton || self.in_singleton() { "." } else { "#" };
        join(self.prefix(), sep, name)
    }

    fn bind(&mut self, key: String, name: impl Into<SmolStr>, node: &'a Node) {
        self.index.insert(
            SmolStr::from(key),
            IndexEntry {
                name: name.into(),
                node,
            },
        );
    }
}

fn join(prefix: &str, sep: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}{sep}{name}")
    }
}

impl<'a> Visitor<'a> for IndexBuilder<'_, 'a> {
    fn visit_node(&mut self, node: &'a Node) {
        match node {
            Node::Scope(scope) => {
                let frame = if scope.kind == ScopeKind::SingletonClass {
                    Frame {
                        prefix: self.prefix().to_string(),
                        singleton: true,
                    }
                } else {
                    let key = self.const_key(&scope.name);
                    self.bind(key.clone(), scope.name.clone(), node);
                    Frame {
                        prefix: key,
                        singleton: false,
                    }
                };
                self.scopes.push(frame);
                walk_node(self, node);
                self.scopes.pop();
            }
            Node::Const(c) => {
                let key = self.const_key(&c.name);
                self.bind(key, c.name.clone(), node);
            }
            Node::TypeMember(member) => {
                let key = self.const_key(&member.name);
                self.bind(key, member.name.clone(), node);
            }
            Node::Method(method) => {
                let key = self.method_key(&method.name, method.is_singleton);
                self.bind(key, method.name.clone(), node);
            }
            Node::Attr(attr) => {
                for (name, is_writer) in attr_bindings(attr) {
                    let method_name = if is_writer {
                        format!("{name}=")
                    } else {
                        name.to_string()
                    };
                    let key = self.method_key(&method_name, false);
                    self.bind(key, method_name, node);
                }
            }
            Node::StructField(field) => {
                let key = self.method_key(&field.name, false);
                self.bind(key, field.name.clone(), node);
                if field.kind == FieldKind::Prop {
                    let setter = format!("{}=", field.name);
                    let key = self.method_key(&setter, false);
                    self.bind(key, setter, node);
                }
            }
            Node::EnumBlock(block) => {
                for value in &block.values {
                    let key = self.const_key(value);
                    self.bind(key, value.clone(), node);
                }
            }
            Node::Mixin(_) | Node::Helper(_) => {}
        }
    }
}

/// `(name, is_writer)` for every method an attribute defines.
fn attr_bindings(attr: &Attr) -> Vec<(&str, bool)> {
    let mut out = Vec::new();
    for name in &attr.names {
        if matches!(attr.kind, AttrKind::Reader | AttrKind::Accessor) {
            out.push((name.as_str(), false));
        }
        if matches!(attr.kind, AttrKind::Writer | AttrKind::Accessor) {
            out.push((name.as_str(), true));
        }
    }
    out
}

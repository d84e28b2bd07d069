//! Tree traversal.
//!
//! [`Visitor`] has one method per node kind. Every method defaults to the
//! matching `walk_*` function, which does the structural recursion, so an
//! implementation overrides only the kinds it cares about and calls the
//! `walk_*` function itself when it still wants the children visited.
//!
//! The dispatch in [`walk_node`] is an exhaustive `match` over [`Node`]:
//! adding a node kind fails to compile until it is dispatched here.

use crate::model::{
    Attr, Const, EnumBlock, Helper, Method, Mixin, Node, Scope, StructField, Tree, TypeMember,
};

pub trait Visitor<'a> {
    /// Visit an optional node; `None` is a no-op.
    #[inline]
    fn visit(&mut self, node: Option<&'a Node>) {
        if let Some(node) = node {
            self.visit_node(node);
        }
    }

    /// Visit every node in order.
    #[inline]
    fn visit_all(&mut self, nodes: &'a [Node]) {
        walk_all(self, nodes);
    }

    #[inline]
    fn visit_tree(&mut self, tree: &'a Tree) {
        walk_tree(self, tree);
    }

    #[inline]
    fn visit_node(&mut self, node: &'a Node) {
        walk_node(self, node);
    }

    #[inline]
    fn visit_scope(&mut self, scope: &'a Scope) {
        walk_scope(self, scope);
    }

    #[inline]
    fn visit_const(&mut self, _node: &'a Const) {}

    #[inline]
    fn visit_method(&mut self, _node: &'a Method) {}

    #[inline]
    fn visit_attr(&mut self, _node: &'a Attr) {}

    #[inline]
    fn visit_mixin(&mut self, _node: &'a Mixin) {}

    #[inline]
    fn visit_struct_field(&mut self, _node: &'a StructField) {}

    #[inline]
    fn visit_enum_block(&mut self, _node: &'a EnumBlock) {}

    #[inline]
    fn visit_helper(&mut self, _node: &'a Helper) {}

    #[inline]
    fn visit_type_member(&mut self, _node: &'a TypeMember) {}
}

pub fn walk_all<'a, V: Visitor<'a> + ?Sized>(v: &mut V, nodes: &'a [Node]) {
    for node in nodes {
        v.visit_node(node);
    }
}

pub fn walk_tree<'a, V: Visitor<'a> + ?Sized>(v: &mut V, tree: &'a Tree) {
    v.visit_all(&tree.nodes);
}

pub fn walk_scope<'a, V: Visitor<'a> + ?Sized>(v: &mut V, scope: &'a Scope) {
    v.visit_all(&scope.nodes);
}

pub fn walk_node<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &'a Node) {
    match node {
        Node::Scope(n) => v.visit_scope(n),
        Node::Const(n) => v.visit_const(n),
        Node::Method(n) => v.visit_method(n),
        Node::Attr(n) => v.visit_attr(n),
        Node::Mixin(n) => v.visit_mixin(n),
        Node::StructField(n) => v.visit_struct_field(n),
        Node::EnumBlock(n) => v.visit_enum_block(n),
        Node::Helper(n) => v.visit_helper(n),
        Node::TypeMember(n) => v.visit_type_member(n),
    }
}

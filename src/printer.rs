//! Canonical text rendering of declaration trees.
//!
//! The output depends only on the tree and the [`PrintOptions`]: indentation
//! comes from nesting depth, comments are printed above their node, and
//! sibling spacing follows a fixed rule. Printing a parsed printout yields
//! the same text again.
//!
//! The printer never fails. Empty names and other invalid data are printed
//! as they are; rejecting them is the job of [`crate::validate`].

use crate::base::Loc;
use crate::model::{
    Attr, AttrKind, Comment, Const, EnumBlock, FieldKind, Helper, Method, Mixin, MixinKind, Node,
    Param, ParamKind, Scope, ScopeKind, Sig, StructField, Tree, TypeExpr, TypeMember, Visibility,
};
use crate::visit::{Visitor, walk_node};

/// Options controlling [`print`].
///
/// With the `serde` feature the options deserialize from a map in which
/// every field is optional and unknown keys are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PrintOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Separate sibling declarations with a blank line, except between two
    /// one-line declarations.
    pub blank_lines_between: bool,
    /// Put a blank line after a scope header and before its `end`.
    pub blank_lines_at_scope_edges: bool,
    /// Append each node's source location as a trailing comment.
    pub print_locs: bool,
    /// Break signatures longer than this into one parameter per line.
    pub max_line_length: Option<usize>,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            blank_lines_between: true,
            blank_lines_at_scope_edges: false,
            print_locs: false,
            max_line_length: None,
        }
    }
}

impl PrintOptions {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_blank_lines_between(mut self, enabled: bool) -> Self {
        self.blank_lines_between = enabled;
        self
    }

    pub fn with_blank_lines_at_scope_edges(mut self, enabled: bool) -> Self {
        self.blank_lines_at_scope_edges = enabled;
        self
    }

    pub fn with_locs(mut self, enabled: bool) -> Self {
        self.print_locs = enabled;
        self
    }

    pub fn with_max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = Some(max);
        self
    }
}

/// Render `tree` as text.
pub fn print(tree: &Tree, options: &PrintOptions) -> String {
    let mut printer = Printer::new(options);
    printer.visit_tree(tree);
    printer.finish()
}

/// A [`Visitor`] accumulating the text of the nodes it visits.
pub struct Printer<'o> {
    options: &'o PrintOptions,
    out: String,
    depth: usize,
}

impl<'o> Printer<'o> {
    pub fn new(options: &'o PrintOptions) -> Self {
        Self {
            options,
            out: String::new(),
            depth: 0,
        }
    }

    /// The text printed so far.
    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            self.out
                .extend(std::iter::repeat_n(' ', self.depth * self.options.indent));
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    /// A header line with the node's location appended when enabled.
    fn header(&mut self, text: &str, node_loc: Option<&Loc>) {
        match node_loc {
            Some(loc) if self.options.print_locs => self.line(&format!("{text} # {loc}")),
            _ => self.line(text),
        }
    }

    fn comments(&mut self, comments: &[Comment]) {
        for comment in comments {
            if comment.text.is_empty() {
                self.line("#");
            } else {
                self.line(&format!("# {}", comment.text));
            }
        }
    }

    fn scope_edge(&mut self) {
        if self.options.blank_lines_at_scope_edges {
            self.blank();
        }
    }

    fn print_const(&mut self, node: &Const) {
        self.header(&format!("{} = {}", node.name, node.value), node.loc.as_ref());
    }

    fn print_method(&mut self, method: &Method) {
        for sig in &method.sigs {
            self.print_sig(sig);
        }
        let receiver = if method.is_singleton { "self." } else { "" };
        let params = if method.params.is_empty() {
            String::new()
        } else {
            let params: Vec<String> = method.params.iter().map(param_text).collect();
            format!("({})", params.join(", "))
        };
        let text = format!(
            "{}def {receiver}{}{params}; end",
            visibility_prefix(method.visibility),
            method.name
        );
        self.header(&text, method.loc.as_ref());
    }

    fn print_attr(&mut self, attr: &Attr) {
        for sig in &attr.sigs {
            self.print_sig(sig);
        }
        let keyword = match attr.kind {
            AttrKind::Reader => "attr_reader",
            AttrKind::Writer => "attr_writer",
            AttrKind::Accessor => "attr_accessor",
        };
        let names: Vec<String> = attr.names.iter().map(|n| format!(":{n}")).collect();
        let text = format!(
            "{}{keyword} {}",
            visibility_prefix(attr.visibility),
            names.join(", ")
        );
        self.header(&text, attr.loc.as_ref());
    }

    fn print_mixin(&mut self, mixin: &Mixin) {
        let keyword = match mixin.kind {
            MixinKind::Include => "include",
            MixinKind::Extend => "extend",
            MixinKind::MixesInClassMethods => "mixes_in_class_methods",
        };
        self.header(
            &format!("{keyword} {}", mixin.names.join(", ")),
            mixin.loc.as_ref(),
        );
    }

    fn print_struct_field(&mut self, field: &StructField) {
        let keyword = match field.kind {
            FieldKind::Const => "const",
            FieldKind::Prop => "prop",
        };
        let mut text = format!("{keyword} :{}, {}", field.name, field.ty);
        if let Some(default) = &field.default {
            text.push_str(&format!(", default: {default}"));
        }
        self.header(&text, field.loc.as_ref());
    }

    fn print_enum_block(&mut self, block: &EnumBlock) {
        if block.values.is_empty() {
            self.header("enums do; end", block.loc.as_ref());
            return;
        }
        self.header("enums do", block.loc.as_ref());
        self.depth += 1;
        for value in &block.values {
            self.line(&format!("{value} = new"));
        }
        self.depth -= 1;
        self.line("end");
    }

    fn print_helper(&mut self, helper: &Helper) {
        self.header(&format!("{}!", helper.name), helper.loc.as_ref());
    }

    fn print_type_member(&mut self, member: &TypeMember) {
        self.header(
            &format!("{} = {}", member.name, member.value),
            member.loc.as_ref(),
        );
    }

    fn print_sig(&mut self, sig: &Sig) {
        let open = if sig.flags.is_final { "sig(:final)" } else { "sig" };
        let modifiers = sig_modifiers(sig);
        let returns = match &sig.return_type {
            None | Some(TypeExpr::Void) => "void".to_string(),
            Some(ty) => format!("returns({ty})"),
        };

        let params: Vec<String> = sig
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect();
        let mut chain = modifiers.clone();
        if !params.is_empty() {
            chain.push(format!("params({})", params.join(", ")));
        }
        chain.push(returns.clone());
        let one_line = format!("{open} {{ {} }}", chain.join("."));

        let width = self.depth * self.options.indent + one_line.len();
        let too_long = self.options.max_line_length.is_some_and(|max| width > max);
        if !too_long || params.is_empty() {
            self.line(&one_line);
            return;
        }

        self.line(&format!("{open} do"));
        self.depth += 1;
        let prefix: String = modifiers.iter().map(|m| format!("{m}.")).collect();
        self.line(&format!("{prefix}params("));
        self.depth += 1;
        let last = params.len() - 1;
        for (i, param) in params.iter().enumerate() {
            if i == last {
                self.line(param);
            } else {
                self.line(&format!("{param},"));
            }
        }
        self.depth -= 1;
        self.line(&format!(").{returns}"));
        self.depth -= 1;
        self.line("end");
    }
}

impl<'a> Visitor<'a> for Printer<'_> {
    fn visit_tree(&mut self, tree: &'a Tree) {
        self.comments(&tree.comments);
        if !tree.comments.is_empty() && !tree.nodes.is_empty() {
            self.blank();
        }
        self.visit_all(&tree.nodes);
    }

    fn visit_all(&mut self, nodes: &'a [Node]) {
        let mut prev: Option<&Node> = None;
        for node in nodes {
            let separate = prev.is_some_and(|prev| !(is_one_line(prev) && is_one_line(node)));
            if separate && self.options.blank_lines_between {
                self.blank();
            }
            self.visit_node(node);
            prev = Some(node);
        }
    }

    fn visit_node(&mut self, node: &'a Node) {
        self.comments(node.comments());
        walk_node(self, node);
    }

    fn visit_scope(&mut self, scope: &'a Scope) {
        let (open, closed) = scope_heads(scope);
        if scope.nodes.is_empty() {
            self.header(&closed, scope.loc.as_ref());
            return;
        }
        self.header(&open, scope.loc.as_ref());
        self.depth += 1;
        self.scope_edge();
        self.visit_all(&scope.nodes);
        self.scope_edge();
        self.depth -= 1;
        self.line("end");
    }

    fn visit_const(&mut self, node: &'a Const) {
        self.print_const(node);
    }

    fn visit_method(&mut self, node: &'a Method) {
        self.print_method(node);
    }

    fn visit_attr(&mut self, node: &'a Attr) {
        self.print_attr(node);
    }

    fn visit_mixin(&mut self, node: &'a Mixin) {
        self.print_mixin(node);
    }

    fn visit_struct_field(&mut self, node: &'a StructField) {
        self.print_struct_field(node);
    }

    fn visit_enum_block(&mut self, node: &'a EnumBlock) {
        self.print_enum_block(node);
    }

    fn visit_helper(&mut self, node: &'a Helper) {
        self.print_helper(node);
    }

    fn visit_type_member(&mut self, node: &'a TypeMember) {
        self.print_type_member(node);
    }
}

/// The header of a scope with a body, and its one-line form when empty.
fn scope_heads(scope: &Scope) -> (String, String) {
    let head = match &scope.kind {
        ScopeKind::Module => format!("module {}", scope.name),
        ScopeKind::Class { superclass: None } => format!("class {}", scope.name),
        ScopeKind::Class {
            superclass: Some(superclass),
        } => format!("class {} < {}", scope.name, superclass),
        ScopeKind::SingletonClass => "class << self".to_string(),
        ScopeKind::TStruct => format!("class {} < T::Struct", scope.name),
        ScopeKind::TEnum => format!("class {} < T::Enum", scope.name),
        ScopeKind::Struct {
            members,
            keyword_init,
        } => {
            let mut args: Vec<String> = members.iter().map(|m| format!(":{m}")).collect();
            if *keyword_init {
                args.push("keyword_init: true".to_string());
            }
            let head = format!("{} = ::Struct.new({})", scope.name, args.join(", "));
            return (format!("{head} do"), head);
        }
    };
    let closed = format!("{head}; end");
    (head, closed)
}

/// Whether a node prints on a single line.
fn is_one_line(node: &Node) -> bool {
    if !node.comments().is_empty() || !node.sigs().is_empty() {
        return false;
    }
    match node {
        Node::Scope(scope) => scope.nodes.is_empty(),
        Node::EnumBlock(block) => block.values.is_empty(),
        _ => true,
    }
}

fn visibility_prefix(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "",
        Visibility::Protected => "protected ",
        Visibility::Private => "private ",
    }
}

fn param_text(param: &Param) -> String {
    match &param.kind {
        ParamKind::Required => param.name.to_string(),
        ParamKind::Optional { default } => format!("{} = {default}", param.name),
        ParamKind::Rest => format!("*{}", param.name),
        ParamKind::Keyword => format!("{}:", param.name),
        ParamKind::KeywordOptional { default } => format!("{}: {default}", param.name),
        ParamKind::KeywordRest => format!("**{}", param.name),
        ParamKind::Block => format!("&{}", param.name),
    }
}

/// `abstract`, `override`, ... `bind(T)` in canonical order.
fn sig_modifiers(sig: &Sig) -> Vec<String> {
    let mut out = Vec::new();
    if sig.flags.is_abstract {
        out.push("abstract".to_string());
    }
    if sig.flags.allow_incompatible_override {
        out.push("override(allow_incompatible: true)".to_string());
    } else if sig.flags.is_override {
        out.push("override".to_string());
    }
    if sig.flags.is_overridable {
        out.push("overridable".to_string());
    }
    if !sig.type_params.is_empty() {
        let names: Vec<String> = sig.type_params.iter().map(|n| format!(":{n}")).collect();
        out.push(format!("type_parameters({})", names.join(", ")));
    }
    if let Some(bind) = &sig.bind {
        out.push(format!("bind({bind})"));
    }
    out
}

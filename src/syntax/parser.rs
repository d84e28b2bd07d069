//! Recursive-descent parser for RBI declarations.
//!
//! Statements are line-oriented: a declaration ends at a newline, a `;` or
//! a trailing comment, which is dropped. Comment lines directly above a
//! declaration attach to it. At the top of a file, a comment block followed
//! by a blank line belongs to the tree instead.
//!
//! Inside brackets and `sig` blocks newlines are insignificant; the
//! `multiline` counter tracks that.

use std::mem;

use smol_str::SmolStr;

use super::lexer::{Token, TokenKind, tokenize};
use crate::base::{LineIndex, Loc, TextRange, TextSize};
use crate::error::{MAX_NESTING, Result, SyntaxError};
use crate::model::{
    Attr, AttrKind, Comment, Const, EnumBlock, FieldKind, Helper, Method, Mixin, MixinKind, Node,
    Param, ParamKind, Scope, ScopeKind, Sig, StructField, Tree, TypeMember, Visibility,
};

pub(super) struct Parser<'t> {
    pub(super) text: &'t str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    lines: LineIndex,
    file: Option<SmolStr>,
    pub(super) multiline: usize,
    /// Current type nesting.
    pub(super) depth: usize,
}

// ============================================================================
// CURSOR
// ============================================================================

impl<'t> Parser<'t> {
    pub(super) fn new(text: &'t str, file: Option<&str>) -> Result<Self> {
        let lines = LineIndex::new(text);
        let file = file.map(SmolStr::new);
        let tokens = tokenize(text, &lines).map_err(|mut err| {
            err.loc.file = file.clone();
            err
        })?;
        Ok(Self {
            text,
            tokens,
            pos: 0,
            lines,
            file,
            multiline: 0,
            depth: 0,
        })
    }

    /// Index of the `n`th significant token ahead.
    fn index(&self, n: usize) -> Option<usize> {
        let mut left = n;
        for i in self.pos..self.tokens.len() {
            let kind = self.tokens[i].kind;
            if self.multiline > 0 && matches!(kind, TokenKind::Newline | TokenKind::Comment) {
                continue;
            }
            if left == 0 {
                return Some(i);
            }
            left -= 1;
        }
        None
    }

    pub(super) fn token(&self, n: usize) -> Option<Token> {
        self.index(n).map(|i| self.tokens[i])
    }

    pub(super) fn nth(&self, n: usize) -> Option<TokenKind> {
        self.token(n).map(|t| t.kind)
    }

    pub(super) fn peek(&self) -> Option<TokenKind> {
        self.nth(0)
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    pub(super) fn nth_word(&self, n: usize, word: &str) -> bool {
        self.token(n)
            .is_some_and(|t| t.kind == TokenKind::Ident && self.slice(t) == word)
    }

    pub(super) fn at_word(&self, word: &str) -> bool {
        self.nth_word(0, word)
    }

    pub(super) fn bump(&mut self) -> Option<Token> {
        let i = self.index(0)?;
        self.pos = i + 1;
        Some(self.tokens[i])
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn eat_word(&mut self, word: &str) -> bool {
        if self.at_word(word) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token> {
        match self.token(0) {
            Some(tok) if tok.kind == kind => {
                self.bump();
                Ok(tok)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    pub(super) fn expect_word(&mut self, word: &str) -> Result<Token> {
        match self.token(0) {
            Some(tok) if tok.kind == TokenKind::Ident && self.slice(tok) == word => {
                self.bump();
                Ok(tok)
            }
            _ => Err(self.unexpected(&format!("`{word}`"))),
        }
    }

    pub(super) fn slice(&self, tok: Token) -> &'t str {
        &self.text[tok.range]
    }

    /// End of the last consumed token.
    fn last_end(&self) -> TextSize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(TextSize::from(0), |t| t.range.end())
    }

    pub(super) fn loc(&self, range: TextRange) -> Loc {
        let loc = self.lines.loc(range);
        match &self.file {
            Some(file) => loc.with_file(file.clone()),
            None => loc,
        }
    }

    /// Location from the start of `start` to the last consumed token.
    pub(super) fn loc_from(&self, start: Token) -> Loc {
        let end = self.last_end().max(start.range.end());
        self.loc(TextRange::new(start.range.start(), end))
    }

    /// Run `f` one nesting level deeper, failing past `MAX_NESTING`.
    pub(super) fn nested<T>(
        &mut self,
        what: &str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(format!("{what} is nested too deeply")));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub(super) fn error(&self, message: impl Into<String>) -> SyntaxError {
        let range = match self.token(0) {
            Some(tok) => tok.range,
            None => TextRange::empty(TextSize::of(self.text)),
        };
        SyntaxError::new(message, self.loc(range))
    }

    /// `expected {what}, found ...`
    pub(super) fn unexpected(&self, what: &str) -> SyntaxError {
        match self.token(0) {
            Some(tok) if tok.kind == TokenKind::Newline => {
                self.error(format!("expected {what}, found end of line"))
            }
            Some(tok) => self.error(format!("expected {what}, found `{}`", self.slice(tok))),
            None => self.error(format!("expected {what}, found end of file")),
        }
    }

    /// Run `f` between parentheses, with newlines insignificant inside.
    pub(super) fn parens<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.expect(TokenKind::LParen, "`(`")?;
        self.multiline += 1;
        let value = f(self);
        let close = self.expect(TokenKind::RParen, "`)`");
        self.multiline -= 1;
        let value = value?;
        close?;
        Ok(value)
    }

    /// Consume tokens up to one of `stops` (or an unbalanced closing
    /// bracket) and return their source text.
    pub(super) fn raw_until(&mut self, stops: &[TokenKind], what: &str) -> Result<String> {
        let mut depth = 0usize;
        let mut first: Option<Token> = None;
        let mut last: Option<Token> = None;
        while let Some(kind) = self.peek() {
            let closing = matches!(kind, TokenKind::RParen | TokenKind::RBrack | TokenKind::RBrace);
            if depth == 0 && (closing || stops.contains(&kind)) {
                break;
            }
            let Some(tok) = self.bump() else { break };
            match kind {
                TokenKind::LParen | TokenKind::LBrack | TokenKind::LBrace => {
                    depth += 1;
                    self.multiline += 1;
                }
                _ if closing => {
                    depth -= 1;
                    self.multiline -= 1;
                }
                _ => {}
            }
            first.get_or_insert(tok);
            last = Some(tok);
        }
        self.multiline -= depth;
        match (first, last) {
            (Some(first), Some(last)) if depth == 0 => {
                Ok(self.text[TextRange::new(first.range.start(), last.range.end())].to_string())
            }
            _ => Err(self.unexpected(what)),
        }
    }

    /// A trailing comment, then the end of the line.
    pub(super) fn end_statement(&mut self) -> Result<()> {
        if self.at(TokenKind::Comment) {
            self.bump();
        }
        match self.peek() {
            None | Some(TokenKind::Newline) | Some(TokenKind::Semi) => Ok(()),
            Some(_) => Err(self.unexpected("end of line")),
        }
    }

    fn skip_newlines(&mut self) {
        while matches!(
            self.peek(),
            Some(TokenKind::Newline | TokenKind::Semi | TokenKind::Comment)
        ) {
            self.bump();
        }
    }

    fn comment(&self, tok: Token) -> Comment {
        let raw = &self.slice(tok)[1..];
        let text = raw.strip_prefix(' ').unwrap_or(raw);
        Comment {
            text: text.trim_end_matches('\r').to_string(),
            loc: Some(self.loc(tok.range)),
        }
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

impl<'t> Parser<'t> {
    pub(super) fn parse_tree(mut self) -> Result<Tree> {
        let (nodes, comments) = self.body(true)?;
        Ok(Tree {
            comments,
            nodes,
            loc: Some(self.loc(TextRange::up_to(TextSize::of(self.text)))),
        })
    }

    /// Declarations up to `end` (left for the caller) or the end of input.
    /// At the root, also returns the file header comments.
    fn body(&mut self, root: bool) -> Result<(Vec<Node>, Vec<Comment>)> {
        let mut nodes: Vec<Node> = Vec::new();
        let mut header: Vec<Comment> = Vec::new();
        let mut comments: Vec<Comment> = Vec::new();
        let mut sigs: Vec<Sig> = Vec::new();
        let mut visibility = Visibility::Public;
        let mut newlines = 0;

        while let Some(tok) = self.token(0) {
            match tok.kind {
                TokenKind::Newline => {
                    self.bump();
                    newlines += 1;
                    let first_block = root && nodes.is_empty() && sigs.is_empty();
                    if newlines == 2 && first_block && header.is_empty() {
                        header = mem::take(&mut comments);
                    }
                    continue;
                }
                TokenKind::Semi => {
                    self.bump();
                    continue;
                }
                TokenKind::Comment => {
                    comments.push(self.comment(tok));
                    self.bump();
                    newlines = 0;
                    continue;
                }
                _ => newlines = 0,
            }

            if self.at_word("end") {
                if root {
                    return Err(self.error("unexpected `end`"));
                }
                break;
            }
            if self.at_word("sig") {
                sigs.push(self.sig()?);
                self.end_statement()?;
                continue;
            }
            if let Some(section) = self.visibility_section() {
                visibility = section;
                continue;
            }

            let mut node = self.declaration(visibility)?;
            if !sigs.is_empty() {
                match &mut node {
                    Node::Method(method) => method.sigs = mem::take(&mut sigs),
                    Node::Attr(attr) => attr.sigs = mem::take(&mut sigs),
                    _ => return Err(dangling_sig(&sigs)),
                }
            }
            *node.comments_mut() = mem::take(&mut comments);
            nodes.push(node);
        }

        if !sigs.is_empty() {
            return Err(dangling_sig(&sigs));
        }
        if root && nodes.is_empty() && header.is_empty() {
            header = comments;
        }
        Ok((nodes, header))
    }

    /// A bare `private` / `protected` / `public` line.
    fn visibility_section(&mut self) -> Option<Visibility> {
        let visibility = self.visibility_word()?;
        let alone = matches!(
            self.nth(1),
            None | Some(TokenKind::Newline | TokenKind::Semi | TokenKind::Comment)
        );
        if !alone {
            return None;
        }
        self.bump();
        self.end_statement().ok()?;
        Some(visibility)
    }

    fn visibility_word(&self) -> Option<Visibility> {
        let tok = self.token(0)?;
        if tok.kind != TokenKind::Ident {
            return None;
        }
        match self.slice(tok) {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }

    fn declaration(&mut self, visibility: Visibility) -> Result<Node> {
        let Some(tok) = self.token(0) else {
            return Err(self.unexpected("a declaration"));
        };
        match tok.kind {
            TokenKind::Const | TokenKind::ColonColon => return self.assignment(),
            TokenKind::Ident => {}
            _ => return Err(self.unexpected("a declaration")),
        }

        if let Some(modifier) = self.visibility_word() {
            self.bump();
            return match self.token(0) {
                Some(next) if matches!(self.slice(next), "def" | "attr_reader" | "attr_writer" | "attr_accessor") => {
                    self.declaration(modifier)
                }
                _ => Err(self.unexpected("`def` or an attribute after a visibility modifier")),
            };
        }

        let word = self.slice(tok);
        match word {
            "module" => self.module(),
            "class" => self.class(),
            "def" => self.method(visibility),
            "attr_reader" => self.attr(AttrKind::Reader, visibility),
            "attr_writer" => self.attr(AttrKind::Writer, visibility),
            "attr_accessor" => self.attr(AttrKind::Accessor, visibility),
            "include" => self.mixin(MixinKind::Include),
            "extend" => self.mixin(MixinKind::Extend),
            "mixes_in_class_methods" => self.mixin(MixinKind::MixesInClassMethods),
            "const" => self.struct_field(FieldKind::Const),
            "prop" => self.struct_field(FieldKind::Prop),
            "enums" => self.enum_block(),
            _ if word.ends_with('!') => {
                self.bump();
                let mut helper = Helper::new(&word[..word.len() - 1]);
                helper.loc = Some(self.loc_from(tok));
                self.end_statement()?;
                Ok(helper.into())
            }
            _ => Err(self.error(format!("unexpected `{word}`"))),
        }
    }

    /// `Foo`, `::Foo::Bar`
    pub(super) fn qualified_name(&mut self) -> Result<SmolStr> {
        let start = self.token(0).ok_or_else(|| self.unexpected("a constant name"))?;
        self.eat(TokenKind::ColonColon);
        self.expect(TokenKind::Const, "a constant name")?;
        while self.at(TokenKind::ColonColon) && self.nth(1) == Some(TokenKind::Const) {
            self.bump();
            self.bump();
        }
        let range = TextRange::new(start.range.start(), self.last_end());
        Ok(SmolStr::new(&self.text[range]))
    }

    fn module(&mut self) -> Result<Node> {
        let start = self.expect_word("module")?;
        let name = self.qualified_name()?;
        self.scope_rest(start, Scope::module(name))
    }

    fn class(&mut self) -> Result<Node> {
        let start = self.expect_word("class")?;
        if self.eat(TokenKind::LtLt) {
            self.expect_word("self")?;
            return self.scope_rest(start, Scope::singleton_class());
        }
        let name = self.qualified_name()?;
        let kind = if self.eat(TokenKind::Lt) {
            let superclass = self.superclass()?;
            match superclass.trim_start_matches("::") {
                "T::Struct" => ScopeKind::TStruct,
                "T::Enum" => ScopeKind::TEnum,
                _ => ScopeKind::Class {
                    superclass: Some(superclass),
                },
            }
        } else {
            ScopeKind::Class { superclass: None }
        };
        self.scope_rest(start, Scope::new(kind, name))
    }

    /// A qualified name with optional type arguments: `Foo[Bar]`.
    fn superclass(&mut self) -> Result<SmolStr> {
        let start = self.token(0).ok_or_else(|| self.unexpected("a superclass"))?;
        self.qualified_name()?;
        if self.at(TokenKind::LBrack) {
            self.bump();
            self.multiline += 1;
            self.raw_until(&[], "type arguments")?;
            let close = self.expect(TokenKind::RBrack, "`]`");
            self.multiline -= 1;
            close?;
        }
        let range = TextRange::new(start.range.start(), self.last_end());
        Ok(SmolStr::new(&self.text[range]))
    }

    /// `; end` or a body followed by `end`.
    fn scope_rest(&mut self, start: Token, mut scope: Scope) -> Result<Node> {
        if self.at(TokenKind::Semi) && self.nth_word(1, "end") {
            self.bump();
            self.bump();
        } else {
            self.end_statement()?;
            let (nodes, _) = self.nested("scope", |p| p.body(false))?;
            scope.nodes = nodes;
            self.expect_word("end")?;
        }
        scope.loc = Some(self.loc_from(start));
        self.end_statement()?;
        Ok(scope.into())
    }

    fn method(&mut self, visibility: Visibility) -> Result<Node> {
        let start = self.expect_word("def")?;
        let is_singleton = self.at_word("self") && self.nth(1) == Some(TokenKind::Dot);
        if is_singleton {
            self.bump();
            self.bump();
        }
        let mut method = Method::new(self.method_name()?);
        method.is_singleton = is_singleton;
        method.visibility = visibility;

        if self.at(TokenKind::LParen) {
            method.params = self.parens(|p| {
                let mut params = Vec::new();
                while !p.at(TokenKind::RParen) {
                    params.push(p.param()?);
                    if !p.eat(TokenKind::Comma) {
                        break;
                    }
                }
                Ok(params)
            })?;
        }

        if self.at(TokenKind::Semi) && self.nth_word(1, "end") {
            self.bump();
            self.bump();
        } else {
            self.end_statement()?;
            self.skip_newlines();
            self.expect_word("end")?;
        }
        method.loc = Some(self.loc_from(start));
        self.end_statement()?;
        Ok(method.into())
    }

    /// An identifier or operator, glued from adjacent tokens: `foo=`, `[]=`.
    fn method_name(&mut self) -> Result<SmolStr> {
        let first = self.token(0).ok_or_else(|| self.unexpected("a method name"))?;
        let valid_start = matches!(
            first.kind,
            TokenKind::Ident
                | TokenKind::Const
                | TokenKind::Op
                | TokenKind::Lt
                | TokenKind::LtLt
                | TokenKind::Star
                | TokenKind::StarStar
                | TokenKind::Amp
                | TokenKind::Pipe
                | TokenKind::Bang
                | TokenKind::LBrack
        );
        if !valid_start {
            return Err(self.unexpected("a method name"));
        }
        self.bump();
        let mut end = first.range.end();
        while let Some(next) = self.token(0) {
            let glued = next.range.start() == end
                && matches!(next.kind, TokenKind::Eq | TokenKind::RBrack);
            if !glued {
                break;
            }
            self.bump();
            end = next.range.end();
        }
        Ok(SmolStr::new(&self.text[TextRange::new(first.range.start(), end)]))
    }

    fn param(&mut self) -> Result<Param> {
        let start = self.token(0).ok_or_else(|| self.unexpected("a parameter"))?;
        let prefixed = match start.kind {
            TokenKind::Star => Some(ParamKind::Rest),
            TokenKind::StarStar => Some(ParamKind::KeywordRest),
            TokenKind::Amp => Some(ParamKind::Block),
            _ => None,
        };
        let mut param = if let Some(kind) = prefixed {
            self.bump();
            let name = match self.token(0) {
                Some(tok) if tok.kind == TokenKind::Ident => {
                    self.bump();
                    self.slice(tok)
                }
                _ => "",
            };
            Param::new(name, kind)
        } else {
            let name_tok = self.expect(TokenKind::Ident, "a parameter name")?;
            let name = self.slice(name_tok);
            if self.eat(TokenKind::Colon) {
                if matches!(self.peek(), Some(TokenKind::Comma | TokenKind::RParen)) {
                    Param::keyword(name)
                } else {
                    let default =
                        self.raw_until(&[TokenKind::Comma], "a default value")?;
                    Param::keyword_optional(name, default)
                }
            } else if self.eat(TokenKind::Eq) {
                let default = self.raw_until(&[TokenKind::Comma], "a default value")?;
                Param::optional(name, default)
            } else {
                Param::required(name)
            }
        };
        param.loc = Some(self.loc_from(start));
        Ok(param)
    }

    fn attr(&mut self, kind: AttrKind, visibility: Visibility) -> Result<Node> {
        let start = self.bump().ok_or_else(|| self.unexpected("an attribute"))?;
        let mut names = Vec::new();
        loop {
            let tok = self.expect(TokenKind::Symbol, "a symbol")?;
            names.push(symbol_name(self.slice(tok)));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        let mut attr = Attr::new(kind, names).with_visibility(visibility);
        attr.loc = Some(self.loc_from(start));
        self.end_statement()?;
        Ok(attr.into())
    }

    fn mixin(&mut self, kind: MixinKind) -> Result<Node> {
        let start = self.bump().ok_or_else(|| self.unexpected("a mixin"))?;
        let mut names = Vec::new();
        loop {
            names.push(self.qualified_name()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        let mut mixin = Mixin::new(kind, names);
        mixin.loc = Some(self.loc_from(start));
        self.end_statement()?;
        Ok(mixin.into())
    }

    /// `const :name, Type, default: value`; other options are skipped.
    fn struct_field(&mut self, kind: FieldKind) -> Result<Node> {
        let start = self.bump().ok_or_else(|| self.unexpected("a field"))?;
        let name = self.expect(TokenKind::Symbol, "a field name")?;
        self.expect(TokenKind::Comma, "`,`")?;
        let ty = self.type_expr()?;
        let mut field = StructField::new(kind, symbol_name(self.slice(name)), ty);

        while self.eat(TokenKind::Comma) {
            let key = self.expect(TokenKind::Ident, "an option name")?;
            self.expect(TokenKind::Colon, "`:`")?;
            let value = self.raw_until(&STATEMENT_END_OR_COMMA, "an option value")?;
            if self.slice(key) == "default" {
                field.default = Some(value);
            }
        }
        field.loc = Some(self.loc_from(start));
        self.end_statement()?;
        Ok(field.into())
    }

    fn enum_block(&mut self) -> Result<Node> {
        let start = self.expect_word("enums")?;
        self.expect_word("do")?;
        let mut block = EnumBlock::default();
        loop {
            self.skip_newlines();
            if self.at_word("end") {
                break;
            }
            let name = self.expect(TokenKind::Const, "an enum value")?;
            self.expect(TokenKind::Eq, "`=`")?;
            self.expect_word("new")?;
            if self.at(TokenKind::LParen) {
                self.parens(|p| {
                    if !p.at(TokenKind::RParen) {
                        p.raw_until(&[], "arguments")?;
                    }
                    Ok(())
                })?;
            }
            block.values.push(SmolStr::new(self.slice(name)));
            self.end_statement()?;
        }
        self.expect_word("end")?;
        block.loc = Some(self.loc_from(start));
        self.end_statement()?;
        Ok(block.into())
    }

    /// `NAME = value`, `Elem = type_member`, `S = ::Struct.new(...)`.
    fn assignment(&mut self) -> Result<Node> {
        let start = self.token(0).ok_or_else(|| self.unexpected("a constant"))?;
        let name = self.qualified_name()?;
        self.expect(TokenKind::Eq, "`=`")?;

        if self.at_struct_new() {
            return self.struct_new(start, name);
        }
        let is_type_member = self.at_word("type_member") || self.at_word("type_template");
        let value = self.raw_until(&STATEMENT_END, "a value")?;
        let loc = Some(self.loc_from(start));
        self.end_statement()?;

        if is_type_member {
            let mut member = TypeMember::new(name, value);
            member.loc = loc;
            Ok(member.into())
        } else {
            let mut constant = Const::new(name, value);
            constant.loc = loc;
            Ok(constant.into())
        }
    }

    fn at_struct_new(&self) -> bool {
        let offset = usize::from(self.at(TokenKind::ColonColon));
        self.token(offset)
            .is_some_and(|t| t.kind == TokenKind::Const && self.slice(t) == "Struct")
            && self.nth(offset + 1) == Some(TokenKind::Dot)
            && self.nth_word(offset + 2, "new")
    }

    fn struct_new(&mut self, start: Token, name: SmolStr) -> Result<Node> {
        self.eat(TokenKind::ColonColon);
        self.bump();
        self.bump();
        self.bump();

        let mut members = Vec::new();
        let mut keyword_init = false;
        if self.at(TokenKind::LParen) {
            self.parens(|p| {
                while !p.at(TokenKind::RParen) {
                    if p.at_word("keyword_init") {
                        p.bump();
                        p.expect(TokenKind::Colon, "`:`")?;
                        keyword_init = p.eat_word("true");
                        if !keyword_init {
                            p.expect_word("false")?;
                        }
                    } else {
                        let tok = p.expect(TokenKind::Symbol, "a member name")?;
                        members.push(symbol_name(p.slice(tok)));
                    }
                    if !p.eat(TokenKind::Comma) {
                        break;
                    }
                }
                Ok(())
            })?;
        }

        let mut scope = Scope::new(
            ScopeKind::Struct {
                members,
                keyword_init,
            },
            name,
        );
        if self.eat_word("do") {
            self.end_statement()?;
            let (nodes, _) = self.nested("scope", |p| p.body(false))?;
            scope.nodes = nodes;
            self.expect_word("end")?;
        }
        scope.loc = Some(self.loc_from(start));
        self.end_statement()?;
        Ok(scope.into())
    }
}

const STATEMENT_END: [TokenKind; 3] = [TokenKind::Newline, TokenKind::Semi, TokenKind::Comment];

const STATEMENT_END_OR_COMMA: [TokenKind; 4] = [
    TokenKind::Newline,
    TokenKind::Semi,
    TokenKind::Comment,
    TokenKind::Comma,
];

/// `:name` or `:"name"` without the sigil and quotes.
fn symbol_name(raw: &str) -> SmolStr {
    let name = &raw[1..];
    SmolStr::new(
        name.strip_prefix('"')
            .and_then(|n| n.strip_suffix('"'))
            .unwrap_or(name),
    )
}

fn dangling_sig(sigs: &[Sig]) -> SyntaxError {
    SyntaxError::new(
        "signature must precede a method or attribute",
        sigs.first().and_then(|s| s.loc.clone()).unwrap_or_default(),
    )
}

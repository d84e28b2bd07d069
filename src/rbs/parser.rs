//! Recursive-descent parser for RBS types and method types.
//!
//! ```text
//! method_type := type_params? params? block? '->' type
//! type        := inter ('|' inter)*
//! inter       := postfix ('&' postfix)*
//! postfix     := primary '?'*
//! primary     := '(' type ')' | tuple | record | proc | class | interface
//!              | 'singleton' '(' Const ')' | base | literal
//! ```

use smol_str::SmolStr;

use super::ast::{BaseType, Block, FnParam, Function, Literal, MethodType, ProcSig, RbsType};
use super::lexer::{Token, TokenKind, tokenize};
use crate::base::{LineIndex, TextRange, TextSize};
use crate::error::{MAX_NESTING, Result, SyntaxError};

/// Parse a single RBS type: `Array[Integer]?`, `^(String) -> void`, ...
pub fn parse_type(text: &str) -> Result<RbsType> {
    let mut p = Parser::new(text)?;
    let ty = p.ty()?;
    p.finish()?;
    Ok(ty)
}

/// Parse an RBS method type: `[U] (U x, ?Integer) { (U) -> void } -> U`.
pub fn parse_method_type(text: &str) -> Result<MethodType> {
    let mut p = Parser::new(text)?;
    let method_type = p.method_type()?;
    p.finish()?;
    Ok(method_type)
}

struct Parser<'t> {
    text: &'t str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn new(text: &'t str) -> Result<Self> {
        Ok(Self {
            text,
            tokens: tokenize(text)?,
            pos: 0,
            depth: 0,
        })
    }

    fn nth(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn peek(&self) -> Option<TokenKind> {
        self.nth(0)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn at_ident(&self, word: &str) -> bool {
        self.tokens
            .get(self.pos)
            .is_some_and(|t| t.kind == TokenKind::Ident && self.slice(*t) == word)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token> {
        match self.tokens.get(self.pos).copied() {
            Some(tok) if tok.kind == kind => {
                self.pos += 1;
                Ok(tok)
            }
            _ => Err(self.error(format!("expected {what}"))),
        }
    }

    fn slice(&self, tok: Token) -> &'t str {
        &self.text[tok.range]
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        let range = match self.tokens.get(self.pos) {
            Some(tok) => tok.range,
            None => {
                let end = TextSize::of(self.text);
                TextRange::empty(end)
            }
        };
        SyntaxError::new(message, LineIndex::new(self.text).loc(range))
    }

    fn finish(&self) -> Result<()> {
        match self.tokens.get(self.pos) {
            None => Ok(()),
            Some(tok) => Err(self.error(format!("unexpected `{}`", self.slice(*tok)))),
        }
    }

    // ---------------------------------------------------------------- types

    fn ty(&mut self) -> Result<RbsType> {
        if self.depth >= MAX_NESTING {
            return Err(self.error("type is nested too deeply"));
        }
        self.depth += 1;
        let ty = self.union();
        self.depth -= 1;
        ty
    }

    fn union(&mut self) -> Result<RbsType> {
        let first = self.intersection()?;
        if !self.at(TokenKind::Pipe) {
            return Ok(first);
        }
        let mut members = vec![first];
        while self.eat(TokenKind::Pipe) {
            members.push(self.intersection()?);
        }
        Ok(RbsType::Union(members))
    }

    fn intersection(&mut self) -> Result<RbsType> {
        let first = self.postfix()?;
        if !self.at(TokenKind::Amp) {
            return Ok(first);
        }
        let mut members = vec![first];
        while self.eat(TokenKind::Amp) {
            members.push(self.postfix()?);
        }
        Ok(RbsType::Intersection(members))
    }

    fn postfix(&mut self) -> Result<RbsType> {
        let mut ty = self.primary()?;
        // `?{` opens an optional block, not an optional type.
        while self.at(TokenKind::Question) && self.nth(1) != Some(TokenKind::LBrace) {
            self.pos += 1;
            ty = RbsType::Optional(Box::new(ty));
        }
        Ok(ty)
    }

    fn primary(&mut self) -> Result<RbsType> {
        let Some(tok) = self.tokens.get(self.pos).copied() else {
            return Err(self.error("expected a type"));
        };
        match tok.kind {
            TokenKind::LParen => {
                self.pos += 1;
                let ty = self.ty()?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(ty)
            }
            TokenKind::LBrack => {
                self.pos += 1;
                let items = self.type_list(TokenKind::RBrack)?;
                self.expect(TokenKind::RBrack, "`]`")?;
                Ok(RbsType::Tuple(items))
            }
            TokenKind::LBrace => self.record(),
            TokenKind::Caret => {
                self.pos += 1;
                let (function, self_type, block) = self.callable()?;
                Ok(RbsType::Proc(Box::new(ProcSig {
                    function,
                    self_type,
                    block,
                })))
            }
            TokenKind::Const => {
                self.pos += 1;
                let args = self.type_args()?;
                Ok(RbsType::ClassInstance {
                    name: SmolStr::new(self.slice(tok)),
                    args,
                })
            }
            TokenKind::Interface => {
                self.pos += 1;
                let args = self.type_args()?;
                Ok(RbsType::Interface {
                    name: SmolStr::new(self.slice(tok)),
                    args,
                })
            }
            TokenKind::Ident => self.keyword_type(tok),
            TokenKind::Integer => {
                self.pos += 1;
                Ok(RbsType::Literal(Literal::Integer(self.slice(tok).to_string())))
            }
            TokenKind::String => {
                self.pos += 1;
                let raw = self.slice(tok);
                let inner = &raw[1..raw.len() - 1];
                Ok(RbsType::Literal(Literal::String(inner.to_string())))
            }
            TokenKind::Colon => self.symbol(tok),
            _ => Err(self.error(format!("unexpected `{}`", self.slice(tok)))),
        }
    }

    fn keyword_type(&mut self, tok: Token) -> Result<RbsType> {
        let word = self.slice(tok);
        if let Some(base) = BaseType::from_keyword(word) {
            self.pos += 1;
            return Ok(RbsType::Base(base));
        }
        match word {
            "true" | "false" => {
                self.pos += 1;
                Ok(RbsType::Literal(Literal::Bool(word == "true")))
            }
            "singleton" => {
                self.pos += 1;
                self.expect(TokenKind::LParen, "`(` after `singleton`")?;
                let name = self.expect(TokenKind::Const, "a class name")?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(RbsType::ClassSingleton {
                    name: SmolStr::new(self.slice(name)),
                })
            }
            _ => Err(self.error(format!("unknown type `{word}`"))),
        }
    }

    /// `:sym`, where the name must follow the colon directly.
    fn symbol(&mut self, colon: Token) -> Result<RbsType> {
        self.pos += 1;
        match self.tokens.get(self.pos).copied() {
            Some(name)
                if matches!(name.kind, TokenKind::Ident | TokenKind::Const)
                    && name.range.start() == colon.range.end() =>
            {
                self.pos += 1;
                Ok(RbsType::Literal(Literal::Symbol(SmolStr::new(
                    self.slice(name),
                ))))
            }
            _ => Err(self.error("expected a symbol name")),
        }
    }

    fn record(&mut self) -> Result<RbsType> {
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut fields = Vec::new();
        while !self.at(TokenKind::RBrace) {
            let key = match self.tokens.get(self.pos).copied() {
                Some(tok) if matches!(tok.kind, TokenKind::Ident | TokenKind::Const) => {
                    self.pos += 1;
                    SmolStr::new(self.slice(tok))
                }
                _ => return Err(self.error("expected a record key")),
            };
            self.expect(TokenKind::Colon, "`:` after record key")?;
            fields.push((key, self.ty()?));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "`}`")?;
        Ok(RbsType::Record(fields))
    }

    fn type_args(&mut self) -> Result<Vec<RbsType>> {
        if !self.eat(TokenKind::LBrack) {
            return Ok(Vec::new());
        }
        let args = self.type_list(TokenKind::RBrack)?;
        if args.is_empty() {
            return Err(self.error("expected a type argument"));
        }
        self.expect(TokenKind::RBrack, "`]`")?;
        Ok(args)
    }

    fn type_list(&mut self, close: TokenKind) -> Result<Vec<RbsType>> {
        let mut items = Vec::new();
        while !self.at(close) {
            items.push(self.ty()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    // ------------------------------------------------------------ functions

    fn method_type(&mut self) -> Result<MethodType> {
        let type_params = if self.at(TokenKind::LBrack) {
            self.type_params()?
        } else {
            Vec::new()
        };
        let (function, self_type, block) = self.callable()?;
        if self_type.is_some() {
            return Err(self.error("a method type cannot bind `self`"));
        }
        Ok(MethodType {
            type_params,
            function,
            block,
        })
    }

    /// `[unchecked out U, V]`; variance modifiers are accepted and dropped.
    fn type_params(&mut self) -> Result<Vec<SmolStr>> {
        self.expect(TokenKind::LBrack, "`[`")?;
        let mut params = Vec::new();
        while !self.at(TokenKind::RBrack) {
            for modifier in ["unchecked", "in", "out"] {
                if self.at_ident(modifier) {
                    self.pos += 1;
                }
            }
            let name = self.expect(TokenKind::Const, "a type parameter name")?;
            params.push(SmolStr::new(self.slice(name)));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrack, "`]`")?;
        Ok(params)
    }

    /// `(params)? [self: T]? block? -> returns`
    fn callable(&mut self) -> Result<(Function, Option<RbsType>, Option<Block>)> {
        let mut function = Function::returning(RbsType::Base(BaseType::Void));
        if self.at(TokenKind::LParen) {
            self.params(&mut function)?;
        }
        let self_type = self.self_binding()?;
        let block = self.block()?;
        self.expect(TokenKind::Arrow, "`->`")?;
        // `^() -> A | B` returns `A | B`.
        function.returns = self.ty()?;
        Ok((function, self_type, block))
    }

    fn self_binding(&mut self) -> Result<Option<RbsType>> {
        let is_binding = self.at(TokenKind::LBrack)
            && self
                .tokens
                .get(self.pos + 1)
                .is_some_and(|t| t.kind == TokenKind::Ident && self.slice(*t) == "self")
            && self.nth(2) == Some(TokenKind::Colon);
        if !is_binding {
            return Ok(None);
        }
        self.pos += 3;
        let ty = self.ty()?;
        self.expect(TokenKind::RBrack, "`]`")?;
        Ok(Some(ty))
    }

    fn block(&mut self) -> Result<Option<Block>> {
        let required = if self.at(TokenKind::Question) && self.nth(1) == Some(TokenKind::LBrace) {
            self.pos += 1;
            false
        } else if self.at(TokenKind::LBrace) {
            true
        } else {
            return Ok(None);
        };
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut function = Function::returning(RbsType::Base(BaseType::Void));
        if self.at(TokenKind::LParen) {
            self.params(&mut function)?;
        }
        let self_type = self.self_binding()?;
        self.expect(TokenKind::Arrow, "`->`")?;
        function.returns = self.ty()?;
        self.expect(TokenKind::RBrace, "`}`")?;
        Ok(Some(Block {
            function,
            self_type,
            required,
        }))
    }

    fn params(&mut self, function: &mut Function) -> Result<()> {
        self.expect(TokenKind::LParen, "`(`")?;
        while !self.at(TokenKind::RParen) {
            self.param(function)?;
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(())
    }

    fn param(&mut self, function: &mut Function) -> Result<()> {
        // `?name: T`
        if self.at(TokenKind::Question)
            && self.nth(1) == Some(TokenKind::Ident)
            && self.nth(2) == Some(TokenKind::Colon)
        {
            self.pos += 1;
            let (key, param) = self.keyword_param()?;
            function.optional_keywords.push((key, param));
            return Ok(());
        }
        // `name: T`
        if self.at(TokenKind::Ident) && self.nth(1) == Some(TokenKind::Colon) {
            let (key, param) = self.keyword_param()?;
            function.required_keywords.push((key, param));
            return Ok(());
        }
        if self.eat(TokenKind::Question) {
            let param = self.named_param()?;
            function.optional.push(param);
            return Ok(());
        }
        if self.eat(TokenKind::StarStar) {
            if function.rest_keywords.is_some() {
                return Err(self.error("duplicate `**` parameter"));
            }
            function.rest_keywords = Some(self.named_param()?);
            return Ok(());
        }
        if self.eat(TokenKind::Star) {
            if function.rest.is_some() {
                return Err(self.error("duplicate `*` parameter"));
            }
            function.rest = Some(self.named_param()?);
            return Ok(());
        }
        let param = self.named_param()?;
        if function.rest.is_some() || !function.optional.is_empty() {
            function.trailing.push(param);
        } else {
            function.required.push(param);
        }
        Ok(())
    }

    fn keyword_param(&mut self) -> Result<(SmolStr, FnParam)> {
        let key = self.expect(TokenKind::Ident, "a keyword name")?;
        let key = SmolStr::new(self.slice(key));
        self.expect(TokenKind::Colon, "`:`")?;
        Ok((key, self.named_param()?))
    }

    /// A type followed by an optional parameter name.
    fn named_param(&mut self) -> Result<FnParam> {
        let ty = self.ty()?;
        let name = match self.tokens.get(self.pos).copied() {
            Some(tok) if tok.kind == TokenKind::Ident => {
                self.pos += 1;
                Some(SmolStr::new(self.slice(tok)))
            }
            _ => None,
        };
        Ok(FnParam { ty, name })
    }
}

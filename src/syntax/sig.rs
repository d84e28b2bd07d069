//! `sig` blocks and Sorbet type expressions.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::lexer::TokenKind;
use super::parser::Parser;
use crate::error::Result;
use crate::model::{ProcType, Sig, SigParam, TypeExpr};

impl Parser<'_> {
    /// `sig { ... }`, `sig(:final) do ... end`
    pub(super) fn sig(&mut self) -> Result<Sig> {
        let start = self.expect_word("sig")?;
        let mut sig = Sig::new();
        if self.at(TokenKind::LParen) {
            self.parens(|p| {
                let tok = p.expect(TokenKind::Symbol, "`:final`")?;
                if p.slice(tok) != ":final" {
                    return Err(p.error(format!("unknown sig mode `{}`", p.slice(tok))));
                }
                Ok(())
            })?;
            sig.flags.is_final = true;
        }

        let braces = if self.eat(TokenKind::LBrace) {
            true
        } else if self.eat_word("do") {
            false
        } else {
            return Err(self.unexpected("`{` or `do`"));
        };

        self.multiline += 1;
        let chain = self.sig_chain(&mut sig);
        let close = if braces {
            self.expect(TokenKind::RBrace, "`}`").map(drop)
        } else {
            self.expect_word("end").map(drop)
        };
        self.multiline -= 1;
        chain?;
        close?;

        sig.loc = Some(self.loc_from(start));
        Ok(sig)
    }

    fn sig_chain(&mut self, sig: &mut Sig) -> Result<()> {
        loop {
            self.sig_call(sig)?;
            if !self.eat(TokenKind::Dot) {
                return Ok(());
            }
        }
    }

    fn sig_call(&mut self, sig: &mut Sig) -> Result<()> {
        let tok = self.expect(TokenKind::Ident, "a signature builder")?;
        match self.slice(tok) {
            "abstract" => sig.flags.is_abstract = true,
            "overridable" => sig.flags.is_overridable = true,
            "override" => {
                sig.flags.is_override = true;
                if self.at(TokenKind::LParen) {
                    self.parens(|p| {
                        p.expect_word("allow_incompatible")?;
                        p.expect(TokenKind::Colon, "`:`")?;
                        p.expect_word("true")
                    })?;
                    sig.flags.allow_incompatible_override = true;
                }
            }
            "type_parameters" => {
                sig.type_params = self.parens(|p| {
                    let mut names = Vec::new();
                    while !p.at(TokenKind::RParen) {
                        let name = p.expect(TokenKind::Symbol, "a type parameter")?;
                        names.push(SmolStr::new(&p.slice(name)[1..]));
                        if !p.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                    Ok(names)
                })?;
            }
            "bind" => sig.bind = Some(self.parens(Self::type_expr)?),
            "params" => {
                sig.params = self
                    .parens(Self::named_types)?
                    .into_iter()
                    .map(|(name, ty)| SigParam::new(name, ty))
                    .collect();
            }
            "returns" => sig.return_type = Some(self.parens(Self::type_expr)?),
            "void" => sig.return_type = Some(TypeExpr::Void),
            // Runtime checking levels carry no static meaning.
            "checked" | "on_failure" => {
                self.parens(|p| p.raw_until(&[], "arguments").map(drop))?;
            }
            other => return Err(self.error(format!("unknown signature builder `{other}`"))),
        }
        Ok(())
    }

    /// `name: Type, ...` up to the closing parenthesis.
    fn named_types(&mut self) -> Result<Vec<(SmolStr, TypeExpr)>> {
        let mut out = Vec::new();
        while !self.at(TokenKind::RParen) {
            let name = self.expect(TokenKind::Ident, "a parameter name")?;
            self.expect(TokenKind::Colon, "`:`")?;
            out.push((SmolStr::new(self.slice(name)), self.type_expr()?));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(out)
    }

    /// A comma separated list of types up to `close`, which is left.
    fn type_list(&mut self, close: TokenKind) -> Result<Vec<TypeExpr>> {
        let mut types = Vec::new();
        while !self.at(close) {
            types.push(self.type_expr()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(types)
    }

    pub(super) fn type_expr(&mut self) -> Result<TypeExpr> {
        self.nested("type", Self::type_term)
    }

    fn type_term(&mut self) -> Result<TypeExpr> {
        let Some(tok) = self.token(0) else {
            return Err(self.unexpected("a type"));
        };
        match tok.kind {
            TokenKind::Const if self.slice(tok) == "T" && self.nth(1) == Some(TokenKind::Dot) => {
                self.bump();
                self.bump();
                self.t_method()
            }
            TokenKind::Const | TokenKind::ColonColon => {
                let name = self.qualified_name()?;
                if name.trim_start_matches("::") == "T::Boolean" {
                    return Ok(TypeExpr::Boolean);
                }
                if !self.at(TokenKind::LBrack) {
                    return Ok(TypeExpr::Simple(name));
                }
                self.bump();
                self.multiline += 1;
                let args = self.type_list(TokenKind::RBrack);
                let close = self.expect(TokenKind::RBrack, "`]`");
                self.multiline -= 1;
                let args = args?;
                close?;
                Ok(TypeExpr::Generic { base: name, args })
            }
            TokenKind::LBrack => {
                self.bump();
                self.multiline += 1;
                let types = self.type_list(TokenKind::RBrack);
                let close = self.expect(TokenKind::RBrack, "`]`");
                self.multiline -= 1;
                let types = types?;
                close?;
                Ok(TypeExpr::Tuple(types))
            }
            TokenKind::LBrace => self.shape(),
            TokenKind::Ident if self.slice(tok) == "void" => {
                self.bump();
                Ok(TypeExpr::Void)
            }
            _ => Err(self.unexpected("a type")),
        }
    }

    /// The part after `T.`
    fn t_method(&mut self) -> Result<TypeExpr> {
        let tok = self.expect(TokenKind::Ident, "a `T` method")?;
        let ty = match self.slice(tok) {
            "untyped" => TypeExpr::Untyped,
            "noreturn" => TypeExpr::NoReturn,
            "anything" => TypeExpr::Anything,
            "self_type" => TypeExpr::SelfType,
            "attached_class" => TypeExpr::AttachedClass,
            "nilable" => TypeExpr::nilable(self.parens(Self::type_expr)?),
            "class_of" => TypeExpr::class_of(self.parens(Self::type_expr)?),
            "any" => TypeExpr::Union(self.parens(|p| p.type_list(TokenKind::RParen))?),
            "all" => TypeExpr::Intersection(self.parens(|p| p.type_list(TokenKind::RParen))?),
            "type_parameter" => {
                let name = self.parens(|p| p.expect(TokenKind::Symbol, "a type parameter"))?;
                TypeExpr::type_parameter(&self.slice(name)[1..])
            }
            "proc" => TypeExpr::Proc(self.proc_chain()?),
            other => return Err(self.error(format!("unknown type `T.{other}`"))),
        };
        Ok(ty)
    }

    /// `.bind(..).params(..).returns(..)` after `T.proc`.
    fn proc_chain(&mut self) -> Result<ProcType> {
        let mut proc_type = ProcType::new();
        while self.at(TokenKind::Dot) && self.nth(1) == Some(TokenKind::Ident) {
            self.bump();
            let Some(tok) = self.bump() else { break };
            match self.slice(tok) {
                "bind" => proc_type = proc_type.bind(self.parens(Self::type_expr)?),
                "params" => proc_type.params = self.parens(Self::named_types)?.into_iter().collect(),
                "returns" => proc_type = proc_type.returns(self.parens(Self::type_expr)?),
                "void" => proc_type = proc_type.returns(TypeExpr::Void),
                other => return Err(self.error(format!("unknown proc builder `{other}`"))),
            }
        }
        Ok(proc_type)
    }

    /// `{ key: Type, "other key": Type }`
    fn shape(&mut self) -> Result<TypeExpr> {
        self.expect(TokenKind::LBrace, "`{`")?;
        self.multiline += 1;
        let fields = self.shape_fields();
        let close = self.expect(TokenKind::RBrace, "`}`");
        self.multiline -= 1;
        let fields = fields?;
        close?;
        Ok(TypeExpr::Shape(fields))
    }

    fn shape_fields(&mut self) -> Result<IndexMap<SmolStr, TypeExpr>> {
        let mut fields = IndexMap::new();
        while !self.at(TokenKind::RBrace) {
            let key = match self.token(0) {
                Some(tok) if matches!(tok.kind, TokenKind::Ident | TokenKind::Const) => {
                    SmolStr::new(self.slice(tok))
                }
                Some(tok) if tok.kind == TokenKind::String => unquote(self.slice(tok)),
                _ => return Err(self.unexpected("a shape key")),
            };
            self.bump();
            self.expect(TokenKind::Colon, "`:`")?;
            fields.insert(key, self.type_expr()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(fields)
    }
}

/// The contents of a quoted string literal, with simple escapes resolved.
fn unquote(raw: &str) -> SmolStr {
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    SmolStr::new(out)
}

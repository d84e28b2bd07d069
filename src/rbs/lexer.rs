//! Tokens of the RBS type grammar.

use logos::Logos;

use crate::base::{LineIndex, TextRange, TextSize};
use crate::error::SyntaxError;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[rustfmt::skip]
pub(crate) enum TokenKind {
    #[token("(")] LParen,
    #[token(")")] RParen,
    #[token("[")] LBrack,
    #[token("]")] RBrack,
    #[token("{")] LBrace,
    #[token("}")] RBrace,
    #[token(",")] Comma,
    #[token("|")] Pipe,
    #[token("&")] Amp,
    #[token("?")] Question,
    #[token("^")] Caret,
    #[token("*")] Star,
    #[token("**")] StarStar,
    #[token("->")] Arrow,
    #[token(":")] Colon,

    /// `Foo`, `::Foo::Bar`
    #[regex(r"(::)?([A-Z][A-Za-z0-9_]*::)*[A-Z][A-Za-z0-9_]*")]
    Const,
    /// `_Each`, `::Foo::_Each`
    #[regex(r"(::)?([A-Z][A-Za-z0-9_]*::)*_[A-Z][A-Za-z0-9_]*")]
    Interface,
    /// Lowercase names: base types, parameter names, keywords.
    #[regex(r"[a-z][A-Za-z0-9_]*|_[a-z0-9_][A-Za-z0-9_]*|_")]
    Ident,
    #[regex(r"-?[0-9][0-9_]*")]
    Integer,
    #[regex(r#""([^"\\\n\r]|\\.)*"|'([^'\\\n\r]|\\.)*'"#)]
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
}

/// Split `text` into tokens, failing on the first unrecognized character.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = TokenKind::lexer(text);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let range = TextRange::new(to_size(span.start), to_size(span.end));
        match result {
            Ok(kind) => tokens.push(Token { kind, range }),
            Err(()) => {
                let loc = LineIndex::new(text).loc(range);
                return Err(SyntaxError::new(
                    format!("unexpected character `{}`", lexer.slice()),
                    loc,
                ));
            }
        }
    }
    Ok(tokens)
}

fn to_size(offset: usize) -> TextSize {
    TextSize::new(u32::try_from(offset).unwrap_or(u32::MAX))
}

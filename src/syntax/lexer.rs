//! Tokens of RBI source files.
//!
//! Keywords are not separate tokens: `def`, `class`, `sig` and friends lex
//! as [`TokenKind::Ident`] and the parser checks their text. Newlines and
//! comments are real tokens since both are significant in the grammar.

use logos::Logos;

use crate::base::{LineIndex, TextRange, TextSize};
use crate::error::SyntaxError;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\f]+")]
#[logos(skip r"\\\r?\n")]
#[rustfmt::skip]
pub(crate) enum TokenKind {
    #[regex(r"\r?\n")] Newline,
    #[regex(r"#[^\r\n]*", allow_greedy = true)] Comment,

    #[token(";")] Semi,
    #[token(",")] Comma,
    #[token(".")] Dot,
    #[token("::")] ColonColon,
    #[token(":")] Colon,
    #[token("(")] LParen,
    #[token(")")] RParen,
    #[token("[")] LBrack,
    #[token("]")] RBrack,
    #[token("{")] LBrace,
    #[token("}")] RBrace,
    #[token("=")] Eq,
    #[token("<")] Lt,
    #[token("<<")] LtLt,
    #[token("*")] Star,
    #[token("**")] StarStar,
    #[token("&")] Amp,
    #[token("|")] Pipe,
    #[token("!")] Bang,
    #[token("?")] Question,
    #[token("=>")] FatArrow,
    #[token("->")] Arrow,

    /// Operators that only appear as method names.
    #[regex(r"===|==|!=|=~|!~|<=>|<=|>=|>>|>|\+@|-@|\+|-|/|%|\^|~")]
    Op,

    #[regex(r"[a-z_][A-Za-z0-9_]*[?!]?")]
    Ident,
    #[regex(r"[A-Z][A-Za-z0-9_]*")]
    Const,
    #[regex(r#":[A-Za-z_][A-Za-z0-9_]*[?!=]?|:"([^"\\\n\r]|\\.)*""#)]
    Symbol,
    #[regex(r"@@?[A-Za-z_][A-Za-z0-9_]*")]
    IVar,
    #[regex(r#""([^"\\\n\r]|\\.)*"|'([^'\\\n\r]|\\.)*'"#)]
    String,
    #[regex(r"-?[0-9][0-9_]*(\.[0-9][0-9_]*)?")]
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
}

/// Split `text` into tokens, failing on the first unrecognized character.
pub(crate) fn tokenize(text: &str, lines: &LineIndex) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = TokenKind::lexer(text);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let range = TextRange::new(to_size(span.start), to_size(span.end));
        match result {
            Ok(kind) => tokens.push(Token { kind, range }),
            Err(()) => {
                return Err(SyntaxError::new(
                    format!("unexpected character `{}`", lexer.slice()),
                    lines.loc(range),
                ));
            }
        }
    }
    Ok(tokens)
}

fn to_size(offset: usize) -> TextSize {
    TextSize::new(u32::try_from(offset).unwrap_or(u32::MAX))
}

//! Lexer for infix expressions.
//!
//! Tokenizes expression text using logos. Whitespace is skipped. Operators the
//! grammar does not support (`**`, `//`, `%`, comparisons, ...) still lex as
//! [`Token::Unsupported`] so the checker can name them instead of reporting a
//! bare lexer failure.

use std::fmt;
use std::ops::Range;

use logos::Logos;

/// Tokens of the infix language.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    /// Integer or decimal literal, kept as source text.
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", lex_number)]
    Number(String),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"\*\*|//|<<|>>|<=|>=|==|!=|[%^<>&|~!@]", |lex| lex.slice().to_string())]
    Unsupported(String),
}

fn lex_number(lex: &mut logos::Lexer<Token>) -> Option<String> {
    let text = lex.slice();
    // The regex only admits valid float syntax, but an out-of-range exponent
    // should still be a lexer error rather than a silent infinity.
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(text.to_string()),
        _ => None,
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Number(n) => write!(f, "{}", n),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Unsupported(op) => write!(f, "{}", op),
        }
    }
}

/// A token together with its byte range in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: Range<usize>,
}

/// Text the lexer could not turn into a token.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unexpected input {text:?}")]
pub struct LexError {
    pub text: String,
    pub span: Range<usize>,
}

/// Tokenize an expression, collecting every unrecognized run of input.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, Vec<LexError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push(Spanned { token, span }),
            Err(()) => errors.push(LexError {
                text: String::from_utf8_lossy(&source.as_bytes()[span.clone()]).into_owned(),
                span,
            }),
        }
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

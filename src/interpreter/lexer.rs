use logos::Logos;
use serde::Serialize;

use crate::{ast::TypeAnnotation, error::ParseError};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone, Serialize)]
pub enum Token {
    /// `fn`
    #[token("fn")]
    Fn,
    /// `return`
    #[token("return")]
    Return,
    /// `let`
    #[token("let")]
    Let,
    /// `const`
    #[token("const")]
    Const,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `of`
    #[token("of")]
    Of,
    /// `in`
    #[token("in")]
    In,
    /// Boolean literal tokens: `true` or `false`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// Floating-point literal tokens, such as `3.14` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens; the stored value has no quotes.
    #[regex(r#""[^"\n]*""#, parse_string)]
    Str(String),
    /// A primitive type name. `int` is an alias for `i32` and `float` for
    /// `f32`; a bare `list` has an unknown element type.
    #[token("int", |_| TypeAnnotation::Int { bits: 32 })]
    #[token("i8", |_| TypeAnnotation::Int { bits: 8 })]
    #[token("i16", |_| TypeAnnotation::Int { bits: 16 })]
    #[token("i32", |_| TypeAnnotation::Int { bits: 32 })]
    #[token("i64", |_| TypeAnnotation::Int { bits: 64 })]
    #[token("float", |_| TypeAnnotation::Float { bits: 32 })]
    #[token("f32", |_| TypeAnnotation::Float { bits: 32 })]
    #[token("f64", |_| TypeAnnotation::Float { bits: 64 })]
    #[token("bool", |_| TypeAnnotation::Bool)]
    #[token("string", |_| TypeAnnotation::Str)]
    #[token("list", |_| TypeAnnotation::List { element: Box::new(TypeAnnotation::Void) })]
    #[token("void", |_| TypeAnnotation::Void)]
    Type(TypeAnnotation),
    /// Identifier tokens; variable or function names such as `x` or `fact`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `:=`
    #[token(":=")]
    InferAssign,
    /// `:`
    #[token(":")]
    Colon,
    /// `=`
    #[token("=")]
    Equals,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `<<`
    #[token("<<")]
    Push,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `;`, an optional statement separator, skipped like whitespace.
    #[token(";", logos::skip)]
    Semicolon,
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip)]
    Comment,
    /// Spaces, tabs and newlines.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Strips the surrounding quotes from a string literal slice.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

/// Tokenizes a source string into `(token, position)` pairs.
///
/// The position is the token's index in the stream; parse errors report it
/// as their location. The stream ends with the iterator itself, which stands
/// in for an explicit EOF token.
///
/// # Errors
/// Returns `ParseError::UnterminatedString` when a `"` is never closed and
/// `ParseError::UnknownSymbol` for any other unlexable input.
///
/// # Example
/// ```
/// use jal::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("let x := 1").unwrap();
///
/// assert_eq!(tokens[0].0, Token::Let);
/// assert_eq!(tokens[1].0, Token::Identifier("x".to_string()));
/// assert_eq!(tokens[2].0, Token::InferAssign);
/// assert_eq!(tokens[3].0, Token::Integer(1));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = tokens.len();
        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(()) => {
                let slice = lexer.slice();
                if slice.starts_with('"') {
                    return Err(ParseError::UnterminatedString { position });
                }
                return Err(ParseError::UnknownSymbol { symbol: slice.to_string(),
                                                       position });
            },
        }
    }

    Ok(tokens)
}

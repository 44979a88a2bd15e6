use std::iter::Peekable;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::parser::{binary::parse_comparison, infer, statement::parse_statement},
    interpreter::lexer::Token,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a token stream into a [`Program`].
///
/// Statements are parsed in order until the stream is exhausted. After the
/// AST is built, the advisory inference pass fills in the type annotations
/// that `:=` declarations left open.
///
/// Parse errors are fatal: the first unexpected token aborts with a message
/// naming the expected and actual token and the token's position index.
/// There is no recovery.
///
/// # Errors
/// Returns the first [`ParseError`] encountered.
///
/// # Example
/// ```
/// use jal::interpreter::{lexer::tokenize, parser::core::parse};
///
/// let tokens = tokenize("let x := 1 + 2").unwrap();
/// let program = parse(&tokens).unwrap();
///
/// assert_eq!(program.body.len(), 1);
/// ```
pub fn parse(tokens: &[(Token, usize)]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let mut body = Vec::new();

    while iter.peek().is_some() {
        body.push(parse_statement(&mut iter)?);
    }

    let mut program = Program { body };
    infer::annotate_types(&mut program);

    Ok(program)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, comparisons, and recursively descends through
/// the precedence hierarchy.
///
/// Grammar: `expression := comparison`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_comparison(tokens)
}

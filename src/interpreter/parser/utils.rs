use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Consumes the next token and verifies it equals `expected`.
///
/// Returns the token's position on success. The `expected` token is also
/// used, via its `Debug` rendering, in the error message.
///
/// # Errors
/// - `UnexpectedToken` when a different token is present.
/// - `UnexpectedEndOfInput` when the stream is exhausted.
pub fn expect<'a, I>(tokens: &mut Peekable<I>, expected: &Token) -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((token, position)) if token == expected => Ok(*position),
        Some((token, position)) => {
            Err(ParseError::UnexpectedToken { expected: format!("{expected:?}"),
                                              found:    format!("{token:?}"),
                                              position: *position, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    }
}

/// Consumes the next token, which must be an identifier, and returns its
/// name.
///
/// # Errors
/// - `UnexpectedToken` when the next token is not an identifier.
/// - `UnexpectedEndOfInput` when the stream is exhausted.
pub fn parse_identifier<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((token, position)) => {
            Err(ParseError::UnexpectedToken { expected: "an identifier".to_string(),
                                              found:    format!("{token:?}"),
                                              position: *position, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    }
}

/// Parses a comma-separated list of items up to (but not including) the
/// `terminator` token.
///
/// The terminator itself is left in the stream for the caller to consume.
/// Empty lists are allowed.
///
/// # Errors
/// Propagates errors from the item parser and reports a missing comma or a
/// truncated stream as parse errors.
pub fn parse_comma_separated<'a, I, T>(tokens: &mut Peekable<I>,
                                       mut parse_item: impl FnMut(&mut Peekable<I>)
                                                           -> ParseResult<T>,
                                       terminator: &Token)
                                       -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();

    if let Some((token, _)) = tokens.peek()
       && token == terminator
    {
        return Ok(items);
    }

    loop {
        items.push(parse_item(tokens)?);

        match tokens.peek() {
            Some((token, _)) if token == terminator => break,
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((token, position)) => {
                return Err(ParseError::UnexpectedToken { expected:
                                                             format!("Comma or {terminator:?}"),
                                                         found:    format!("{token:?}"),
                                                         position: *position, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { position: 0 }),
        }
    }

    Ok(items)
}

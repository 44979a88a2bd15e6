use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated},
        },
    },
};

/// Parses a primary expression followed by any number of index suffixes.
///
/// After any primary, `[ expr ]` suffixes are consumed left to right, each
/// wrapping the expression parsed so far: `grid[y][x]` becomes
/// `Index(Index(grid, y), x)`.
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_primary(tokens)?;

    while let Some((Token::LBracket, _)) = tokens.peek() {
        tokens.next();
        let index = parse_expression(tokens)?;
        expect(tokens, &Token::RBracket)?;

        expr = Expr::Index { object: Box::new(expr),
                             index:  Box::new(index), };
    }

    Ok(expr)
}

/// Parses a primary expression.
///
/// A primary is one of:
/// - a literal (integer, float, boolean, string),
/// - a variable, optionally followed by a call argument list,
/// - a list literal `[e1, e2, ...]`,
/// - a parenthesized expression.
///
/// # Errors
/// `UnexpectedToken` when the current token cannot start an expression.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Integer(value), _)) => {
            Ok(Expr::Literal { value: LiteralValue::Integer(*value), })
        },
        Some((Token::Float(value), _)) => {
            Ok(Expr::Literal { value: LiteralValue::Float(*value), })
        },
        Some((Token::Bool(value), _)) => {
            Ok(Expr::Literal { value: LiteralValue::Bool(*value), })
        },
        Some((Token::Str(value), _)) => {
            Ok(Expr::Literal { value: LiteralValue::Str(value.clone()), })
        },

        Some((Token::Identifier(name), _)) => {
            if let Some((Token::LParen, _)) = tokens.peek() {
                tokens.next();
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                expect(tokens, &Token::RParen)?;

                Ok(Expr::Call { name: name.clone(),
                                arguments })
            } else {
                Ok(Expr::Variable { name: name.clone(), })
            }
        },

        Some((Token::LBracket, _)) => {
            let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
            expect(tokens, &Token::RBracket)?;

            Ok(Expr::List { elements })
        },

        Some((Token::LParen, _)) => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen)?;
            Ok(expr)
        },

        Some((token, position)) => {
            Err(ParseError::UnexpectedToken { expected: "an expression".to_string(),
                                              found:    format!("{token:?}"),
                                              position: *position, })
        },

        None => Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    }
}

/// Returns `true` when `token` can begin an expression.
///
/// Used by the `return` parser to decide whether an argument follows.
#[must_use]
pub const fn starts_expression(token: &Token) -> bool {
    matches!(token,
             Token::Integer(_)
             | Token::Float(_)
             | Token::Bool(_)
             | Token::Str(_)
             | Token::Identifier(_)
             | Token::LBracket
             | Token::LParen)
}

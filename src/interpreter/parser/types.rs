use std::iter::Peekable;

use crate::{
    ast::TypeAnnotation,
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Parses a type annotation.
///
/// The lexer already resolves type keywords (`int`, `i8` .. `i64`, `float`,
/// `f32`, `f64`, `bool`, `string`, `list`, `void`) into
/// [`Token::Type`] values, so this only has to unwrap the token. A bare
/// `list` denotes a list with unknown element type.
///
/// # Errors
/// `UnexpectedToken` when the next token is not a type name.
pub fn parse_type_annotation<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<TypeAnnotation>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Type(annotation), _)) => Ok(annotation.clone()),
        Some((token, position)) => {
            Err(ParseError::UnexpectedToken { expected: "a type name".to_string(),
                                              found:    format!("{token:?}"),
                                              position: *position, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    }
}

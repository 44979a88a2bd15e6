use std::iter::Peekable;

use crate::{
    ast::{FunctionDef, Parameter, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            primary::starts_expression,
            types::parse_type_annotation,
            utils::{expect, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// Dispatch happens on the leading token:
/// - `let` / `const` begin a variable declaration,
/// - `fn` a function declaration,
/// - `return`, `if`, `while`, `for` their respective statements,
/// - `{` a block.
///
/// When the current token is an identifier, one token of lookahead decides
/// between an assignment (`name = expr`), a list push (`name << expr`) and a
/// plain expression statement. Everything else is parsed as an expression
/// statement.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Let, _)) => {
            tokens.next();
            parse_variable_declaration(tokens, true)
        },
        Some((Token::Const, _)) => {
            tokens.next();
            parse_variable_declaration(tokens, false)
        },
        Some((Token::Fn, _)) => {
            tokens.next();
            parse_function_declaration(tokens)
        },
        Some((Token::Return, _)) => {
            tokens.next();
            parse_return(tokens)
        },
        Some((Token::If, _)) => {
            tokens.next();
            parse_if(tokens)
        },
        Some((Token::While, _)) => {
            tokens.next();
            parse_while(tokens)
        },
        Some((Token::For, _)) => {
            tokens.next();
            parse_for(tokens)
        },
        Some((Token::LBrace, _)) => Ok(Statement::Block { body: parse_block(tokens)?, }),

        Some((Token::Identifier(_), _)) => {
            let mut lookahead = tokens.clone();
            lookahead.next();

            match lookahead.peek() {
                Some((Token::Equals, _)) => {
                    let name = parse_identifier(tokens)?;
                    tokens.next();

                    let value = parse_expression(tokens)?;
                    Ok(Statement::Assignment { name, value })
                },
                Some((Token::Push, _)) => {
                    let name = parse_identifier(tokens)?;
                    tokens.next();

                    let value = parse_expression(tokens)?;
                    Ok(Statement::ListPush { target: crate::ast::Expr::Variable { name },
                                             value })
                },
                _ => Ok(Statement::Expression { expr: parse_expression(tokens)?, }),
            }
        },

        Some(_) => Ok(Statement::Expression { expr: parse_expression(tokens)?, }),

        None => Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    }
}

/// Parses a variable declaration after its `let` or `const` keyword.
///
/// Two forms exist:
/// - `NAME := EXPR` leaves the annotation open for the inference pass,
/// - `NAME : TYPE = EXPR` records the explicit annotation.
///
/// An initializer is always required; there is no declaration-without-value
/// form.
fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>,
                                     mutable: bool)
                                     -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens)?;

    match tokens.next() {
        Some((Token::InferAssign, _)) => {
            let initializer = parse_expression(tokens)?;
            Ok(Statement::VariableDeclaration { name,
                                                mutable,
                                                type_annotation: None,
                                                initializer })
        },
        Some((Token::Colon, _)) => {
            let annotation = parse_type_annotation(tokens)?;
            expect(tokens, &Token::Equals)?;
            let initializer = parse_expression(tokens)?;

            Ok(Statement::VariableDeclaration { name,
                                                mutable,
                                                type_annotation: Some(annotation),
                                                initializer })
        },
        Some((token, position)) => {
            Err(ParseError::UnexpectedToken { expected: "':=' or ':'".to_string(),
                                              found:    format!("{token:?}"),
                                              position: *position, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    }
}

/// Parses a function declaration after its `fn` keyword.
///
/// Syntax: `fn NAME ( NAME : TYPE, ... ) : RET_TYPE { BODY }`. The
/// parameter list may be empty; the return type is mandatory.
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens)?;

    expect(tokens, &Token::LParen)?;
    let params = parse_comma_separated(tokens, parse_parameter, &Token::RParen)?;
    expect(tokens, &Token::RParen)?;

    expect(tokens, &Token::Colon)?;
    let return_type = parse_type_annotation(tokens)?;

    let body = parse_block(tokens)?;

    Ok(Statement::Function(FunctionDef { name,
                                         params,
                                         return_type,
                                         body }))
}

/// Parses a single `name : type` parameter.
fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Parameter>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::Colon)?;
    let type_annotation = parse_type_annotation(tokens)?;

    Ok(Parameter { name,
                   type_annotation })
}

/// Parses a `return` statement after its keyword.
///
/// The argument is optional: when the next token cannot start an expression
/// (typically `}` or the next statement keyword), the return is bare.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let argument = match tokens.peek() {
        Some((token, _)) if starts_expression(token) => Some(parse_expression(tokens)?),
        _ => None,
    };

    Ok(Statement::Return { argument })
}

/// Parses an `if` statement after its keyword.
///
/// Syntax: `if ( EXPR ) { ... } [else { ... }]`. The alternate is a plain
/// block; there is no `else if` chaining in the surface grammar.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;

    let consequent = parse_block(tokens)?;

    let alternate = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(parse_block(tokens)?)
    } else {
        None
    };

    Ok(Statement::If { condition,
                       consequent,
                       alternate })
}

/// Parses a `while` statement after its keyword.
///
/// Syntax: `while ( EXPR ) { ... }`.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;

    let body = parse_block(tokens)?;

    Ok(Statement::While { condition, body })
}

/// Parses a `for` statement after its keyword.
///
/// Syntax: `for NAME (of|in) EXPR { ... }`. The `of` keyword iterates over
/// indices, `in` over elements.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let variable = parse_identifier(tokens)?;

    let is_index = match tokens.next() {
        Some((Token::Of, _)) => true,
        Some((Token::In, _)) => false,
        Some((token, position)) => {
            return Err(ParseError::UnexpectedToken { expected: "'of' or 'in'".to_string(),
                                                     found:    format!("{token:?}"),
                                                     position: *position, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    };

    let iterable = parse_expression(tokens)?;
    let body = parse_block(tokens)?;

    Ok(Statement::For { variable,
                        iterable,
                        body,
                        is_index })
}

/// Parses a brace-delimited block and returns its statements.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LBrace)?;

    let mut body = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some(_) => body.push(parse_statement(tokens)?),
            None => return Err(ParseError::UnexpectedEndOfInput { position: 0 }),
        }
    }

    Ok(body)
}

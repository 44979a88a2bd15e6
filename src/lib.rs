//! # jal
//!
//! jal is an interpreter for JAL, a small statically-typed imperative
//! scripting language. It executes a source file end to end through four
//! stages: lexing, parsing (with a light inference pass), static type
//! checking, and tree-walking evaluation.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::TypeErrors,
    interpreter::{checker::core::check, evaluator::core::Context, lexer::tokenize,
                  parser::core::parse},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree, plus the
/// static `TypeAnnotation` model shared by the parser's inference pass and
/// the type checker.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Defines the static type model, `types_match` equality and numeric
///   widening.
/// - Keeps the static and runtime value models strictly separate.
pub mod ast;
/// Provides unified error types for parsing, checking and evaluation.
///
/// This module defines all errors that can be raised while interpreting a
/// program. Parse errors carry the offending token's position index; type
/// and runtime errors carry the names and types involved instead.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer/parser, checker,
///   evaluator).
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, type checking, evaluation,
/// value representation and error handling to provide a complete runtime
/// for JAL programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, checker and evaluator.
/// - Provides entry points for interpreting user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

/// Runs a JAL source string through the full pipeline.
///
/// The stages run in order: tokenize, parse (including the advisory
/// inference pass), type-check, evaluate. Checking failures carry every
/// accumulated diagnostic; parse and runtime failures carry the single
/// fatal error.
///
/// # Errors
/// Returns an error when any stage fails: a [`error::ParseError`], the
/// accumulated [`error::TypeErrors`], or a [`error::RuntimeError`].
///
/// # Examples
/// ```
/// use jal::run_source;
///
/// // A well-typed program executes end to end.
/// let result = run_source("fn main() : void { print(2 + 3) }");
/// assert!(result.is_ok());
///
/// // Assigning to a const is rejected by the checker.
/// let result = run_source("fn main() : void { const k := 1 k = 2 }");
/// assert!(result.unwrap_err().to_string().contains("immutable"));
/// ```
pub fn run_source(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens)?;

    let errors = check(&program);
    if !errors.is_empty() {
        return Err(Box::new(TypeErrors(errors)));
    }

    let mut context = Context::new();
    context.run(&program)?;

    Ok(())
}

/// Runs a source string and returns the finished evaluation context.
///
/// Like [`run_source`], but hands back the [`Context`] so callers can
/// inspect global bindings or the step log afterwards. The context records
/// an execution step log when `trace` is set.
///
/// # Errors
/// Same failure modes as [`run_source`].
pub fn run_source_with_context(source: &str,
                               trace: bool)
                               -> Result<Context, Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens)?;

    let errors = check(&program);
    if !errors.is_empty() {
        return Err(Box::new(TypeErrors(errors)));
    }

    let mut context = if trace {
        Context::new().with_trace()
    } else {
        Context::new()
    };
    context.run(&program)?;

    Ok(context)
}

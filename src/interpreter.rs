/// The checker module validates static typing.
///
/// The type checker walks the AST once, with a forward function
/// registration pass in front, and accumulates diagnostics into an ordered
/// list. A program is only executed when that list is empty.
///
/// # Responsibilities
/// - Registers function signatures so forward references resolve.
/// - Enforces declaration, mutability and shadowing rules per scope.
/// - Derives the type of every expression and validates each statement.
pub mod checker;

/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// manages the scope stack, and dispatches function calls. It is the core
/// execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions and control flow.
/// - Reports runtime errors such as division by zero.
pub mod evaluator;

/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens,
/// each corresponding to a meaningful language element. This is the first
/// stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens.
/// - Handles numeric, boolean and string literals, identifiers, type names
///   and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;

/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of statements
/// and expressions, then runs a light inference pass to fill the type
/// annotations that `:=` declarations leave open.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates grammar, aborting with expected/actual token diagnostics.
/// - Fills inferred type annotations (advisory; the checker re-derives).
pub mod parser;

/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value types used during execution: null,
/// booleans, unified numbers, strings and reference-shared lists. It also
/// provides truthiness coercion and the display formatter used by `print`
/// and `stringify`.
pub mod value;

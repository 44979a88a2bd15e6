/// Binary expression parsing.
///
/// Implements the precedence-climbing layers: comparisons at the lowest
/// level, then additive, then multiplicative operators.
pub mod binary;

/// Parser entry points.
///
/// Contains the `parse` function producing a [`Program`](crate::ast::Program)
/// and the expression entry point used by every statement parser.
pub mod core;

/// The advisory inference pass.
///
/// After parsing, a second walk fills the missing type annotations on `:=`
/// declarations by propagating types through a scope chain that mirrors the
/// block structure. The type checker re-derives all types authoritatively.
pub mod infer;

/// Primary and postfix expression parsing.
///
/// Literals, variables, calls, list literals, parenthesized expressions and
/// trailing index accesses.
pub mod primary;

/// Statement parsing.
///
/// Dispatches on the leading token (or a one-token lookahead for assignments
/// and list pushes) and parses each statement form.
pub mod statement;

/// Type annotation parsing.
pub mod types;

/// Small shared helpers: token expectation, identifiers, comma lists.
pub mod utils;

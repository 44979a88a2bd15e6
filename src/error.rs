/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors are fatal and immediate; each carries the index of the
/// offending token in the stream.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// division by zero, arithmetic on non-numbers, or exceeding the call depth
/// limit. Most type-shaped failures here are defensive: the checker rejects
/// them before execution starts.
pub mod runtime_error;
/// Static type errors.
///
/// Contains the diagnostics produced by the type checker. Unlike parse and
/// runtime errors these are accumulated into an ordered list; the program
/// only runs when the list is empty.
pub mod type_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use type_error::{TypeError, TypeErrors};

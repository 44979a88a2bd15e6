/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations: arithmetic on numbers,
/// ordering comparisons and the equality operators.
pub mod binary;

/// The builtin function library.
///
/// Hosts `print`, `len`, `type`, `stringify` and `toNumber` behind a static
/// dispatch table.
pub mod builtins;

/// Control-flow statement execution: `if`, `while` and `for`.
pub mod control_flow;

/// Core evaluation logic and context management.
///
/// Contains the execution engine: the runtime context with its scope stack,
/// the statement and expression dispatchers, and the top-level run protocol.
pub mod core;

/// User-defined function calls.
///
/// Argument binding, the global-parented call frame discipline and the call
/// depth limit.
pub mod function;

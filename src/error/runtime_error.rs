#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
///
/// Several variants double-check conditions the type checker already
/// rejects; they exist so the evaluator stays sound when driven directly,
/// without a preceding checker run.
pub enum RuntimeError {
    /// Tried to read a variable that is not bound in any active scope.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// Called a function that was never registered.
    UndefinedFunction {
        /// The name of the function.
        name: String,
    },
    /// Tried to declare a name twice in the same scope.
    DuplicateVariable {
        /// The name of the variable.
        name: String,
    },
    /// Tried to overwrite an immutable binding.
    AssignmentToImmutable {
        /// The name of the binding.
        name: String,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The callee name.
        name: String,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// Attempted modulo by zero.
    ModuloByZero,
    /// An arithmetic or comparison operand was not a number.
    ExpectedNumber {
        /// Runtime kind of the offending value.
        found: String,
    },
    /// A list operation was applied to a non-list value.
    ExpectedList {
        /// Runtime kind of the offending value.
        found: String,
    },
    /// A list index was not an integer.
    NonIntegerIndex,
    /// `toNumber` received a string it could not parse.
    NumberParse {
        /// The rejected input.
        value: String,
    },
    /// The call depth limit was exceeded.
    StackOverflow {
        /// The configured maximum number of frames.
        limit: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name } => {
                write!(f, "Runtime error: variable '{name}' is not defined.")
            },
            Self::UndefinedFunction { name } => {
                write!(f, "Runtime error: function '{name}' is not defined.")
            },
            Self::DuplicateVariable { name } => {
                write!(f, "Runtime error: '{name}' is already declared in this scope.")
            },
            Self::AssignmentToImmutable { name } => {
                write!(f, "Runtime error: cannot assign to immutable binding '{name}'.")
            },
            Self::ArgumentCountMismatch { name } => {
                write!(f, "Runtime error: wrong number of arguments for '{name}'.")
            },
            Self::DivisionByZero => write!(f, "Runtime error: division by zero."),
            Self::ModuloByZero => write!(f, "Runtime error: modulo by zero."),
            Self::ExpectedNumber { found } => {
                write!(f, "Runtime error: expected a number, found {found}.")
            },
            Self::ExpectedList { found } => {
                write!(f, "Runtime error: expected a list, found {found}.")
            },
            Self::NonIntegerIndex => {
                write!(f, "Runtime error: list index must be an integer.")
            },
            Self::NumberParse { value } => {
                write!(f, "Runtime error: cannot convert '{value}' to a number.")
            },
            Self::StackOverflow { limit } => {
                write!(f, "Runtime error: stack overflow, call depth exceeded {limit} frames.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}

use crate::ast::{BinaryOperator, TypeAnnotation};

#[derive(Debug, Clone, PartialEq)]
/// Represents a single diagnostic produced by the type checker.
///
/// Type errors carry no source positions; they name the offending symbol and
/// the types involved instead.
pub enum TypeError {
    /// A variable was referenced but never declared.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// A function was called but never declared.
    UndefinedFunction {
        /// The name of the function.
        name: String,
    },
    /// A name was declared twice in the same scope.
    DuplicateVariable {
        /// The name of the variable.
        name: String,
    },
    /// A function name was declared twice.
    DuplicateFunction {
        /// The name of the function.
        name: String,
    },
    /// A declaration would shadow an immutable outer binding.
    ConstShadowed {
        /// The name of the binding.
        name: String,
    },
    /// An assignment targeted an immutable binding.
    AssignmentToImmutable {
        /// The name of the binding.
        name: String,
    },
    /// An assigned value does not match the target's type.
    AssignmentTypeMismatch {
        /// The name of the target.
        name:     String,
        /// The target's declared type.
        expected: TypeAnnotation,
        /// The type of the assigned value.
        found:    TypeAnnotation,
    },
    /// An explicit declaration annotation disagrees with the initializer.
    DeclarationTypeMismatch {
        /// The name being declared.
        name:     String,
        /// The annotated type.
        declared: TypeAnnotation,
        /// The initializer's type.
        found:    TypeAnnotation,
    },
    /// A binary operator was applied to operands it does not accept.
    BinaryOperandMismatch {
        /// The operator.
        op:    BinaryOperator,
        /// Type of the left operand.
        left:  TypeAnnotation,
        /// Type of the right operand.
        right: TypeAnnotation,
    },
    /// An `if` or `while` condition is not a boolean.
    ConditionNotBool {
        /// The condition's actual type.
        found: TypeAnnotation,
    },
    /// A function call passed the wrong number of arguments.
    ArgumentCountMismatch {
        /// The callee name.
        name:     String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        found:    usize,
    },
    /// A builtin was called with an argument kind it does not accept.
    BuiltinArgMismatch {
        /// The builtin name.
        name:     String,
        /// Description of the accepted kinds.
        expected: String,
        /// The argument's type.
        found:    TypeAnnotation,
    },
    /// A function call argument has the wrong type.
    ArgumentTypeMismatch {
        /// The callee name.
        name:     String,
        /// Zero-based argument index.
        index:    usize,
        /// The declared parameter type.
        expected: TypeAnnotation,
        /// The argument's type.
        found:    TypeAnnotation,
    },
    /// A list literal mixes element types.
    ListElementMismatch {
        /// The type of the first element.
        expected: TypeAnnotation,
        /// The first conflicting element type.
        found:    TypeAnnotation,
    },
    /// A pushed value does not match the list's element type.
    ListPushMismatch {
        /// The list's element type.
        expected: TypeAnnotation,
        /// The pushed value's type.
        found:    TypeAnnotation,
    },
    /// A `<<` target is not a list.
    PushToNonList {
        /// The target's actual type.
        found: TypeAnnotation,
    },
    /// An index access was applied to a non-list value.
    IndexNonList {
        /// The indexed value's type.
        found: TypeAnnotation,
    },
    /// An index expression is not an integer.
    IndexNotInteger {
        /// The index expression's type.
        found: TypeAnnotation,
    },
    /// A `for` loop iterable is not a list.
    IterableNotList {
        /// The iterable's actual type.
        found: TypeAnnotation,
    },
    /// A `return` argument does not match the enclosing return type.
    ReturnTypeMismatch {
        /// The declared return type.
        expected: TypeAnnotation,
        /// The returned expression's type.
        found:    TypeAnnotation,
    },
    /// A bare `return` appeared in a function that declares a value.
    MissingReturnValue {
        /// The declared return type.
        expected: TypeAnnotation,
    },
    /// A `return` appeared outside any function body.
    ReturnOutsideFunction,
}

impl std::fmt::Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name } => {
                write!(f, "Type error: variable '{name}' is not defined.")
            },
            Self::UndefinedFunction { name } => {
                write!(f, "Type error: function '{name}' is not defined.")
            },
            Self::DuplicateVariable { name } => {
                write!(f, "Type error: '{name}' is already declared in this scope.")
            },
            Self::DuplicateFunction { name } => {
                write!(f, "Type error: function '{name}' is already defined.")
            },
            Self::ConstShadowed { name } => {
                write!(f, "Type error: cannot shadow immutable binding '{name}'.")
            },
            Self::AssignmentToImmutable { name } => {
                write!(f, "Type error: cannot assign to immutable binding '{name}'.")
            },
            Self::AssignmentTypeMismatch { name,
                                           expected,
                                           found, } => {
                write!(f,
                       "Type error: cannot assign {found} to '{name}' of type {expected}.")
            },
            Self::DeclarationTypeMismatch { name,
                                            declared,
                                            found, } => {
                write!(f,
                       "Type error: '{name}' is declared as {declared} but initialized with {found}.")
            },
            Self::BinaryOperandMismatch { op, left, right } => {
                write!(f,
                       "Type error: operator '{op}' cannot be applied to {left} and {right}.")
            },
            Self::ConditionNotBool { found } => {
                write!(f, "Type error: condition must be bool, found {found}.")
            },
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found, } => {
                write!(f,
                       "Type error: '{name}' takes {expected} argument(s) but {found} were supplied.")
            },
            Self::BuiltinArgMismatch { name,
                                       expected,
                                       found, } => {
                write!(f, "Type error: '{name}' expects {expected}, found {found}.")
            },
            Self::ArgumentTypeMismatch { name,
                                         index,
                                         expected,
                                         found, } => {
                write!(f,
                       "Type error: argument {index} of '{name}' must be {expected}, found {found}.")
            },
            Self::ListElementMismatch { expected, found } => {
                write!(f,
                       "Type error: list elements must share one type, found {expected} and {found}.")
            },
            Self::ListPushMismatch { expected, found } => {
                write!(f,
                       "Type error: cannot push {found} into a list of {expected}.")
            },
            Self::PushToNonList { found } => {
                write!(f, "Type error: '<<' target must be a list, found {found}.")
            },
            Self::IndexNonList { found } => {
                write!(f, "Type error: only lists can be indexed, found {found}.")
            },
            Self::IndexNotInteger { found } => {
                write!(f, "Type error: list index must be an integer, found {found}.")
            },
            Self::IterableNotList { found } => {
                write!(f, "Type error: 'for' iterable must be a list, found {found}.")
            },
            Self::ReturnTypeMismatch { expected, found } => {
                write!(f,
                       "Type error: return type mismatch, expected {expected} but found {found}.")
            },
            Self::MissingReturnValue { expected } => {
                write!(f, "Type error: 'return' without a value in a function returning {expected}.")
            },
            Self::ReturnOutsideFunction => {
                write!(f, "Type error: 'return' outside of a function.")
            },
        }
    }
}

impl std::error::Error for TypeError {}

#[derive(Debug)]
/// The full, ordered list of diagnostics from one checker run.
///
/// Wrapping the list lets the whole rejection travel as a single
/// `std::error::Error`; `Display` prints one diagnostic per line.
pub struct TypeErrors(pub Vec<TypeError>);

impl std::fmt::Display for TypeErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TypeErrors {}

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and returns the
/// resulting value.
type BuiltinFn = fn(&[Value]) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `Any` means every arity is accepted.
#[derive(Clone, Copy)]
pub(crate) enum Arity {
    Exact(usize),
    Any,
}

/// Defines builtin functions by generating a lookup table.
///
/// Each entry provides a string name, an arity specification and a function
/// pointer implementing the builtin. The macro produces `BuiltinDef`
/// (per-entry metadata) and `BUILTIN_TABLE` (the static lookup table).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub(crate) struct BuiltinDef {
            pub(crate) name:  &'static str,
            pub(crate) arity: Arity,
            pub(crate) func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "print"     => { arity: Arity::Any, func: print },
    "len"       => { arity: Arity::Exact(1), func: len },
    "type"      => { arity: Arity::Exact(1), func: type_of },
    "stringify" => { arity: Arity::Exact(1), func: stringify },
    "toNumber"  => { arity: Arity::Exact(1), func: to_number },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity
    /// constraint.
    pub(crate) const fn check(&self, count: usize) -> bool {
        match self {
            Self::Exact(expected) => count == *expected,
            Self::Any => true,
        }
    }
}

/// Looks a builtin up by name.
pub(crate) fn find(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|builtin| builtin.name == name)
}

/// Formats every argument, joins them with single spaces and emits one line
/// to standard output. Returns `null`.
fn print(args: &[Value]) -> EvalResult<Value> {
    let line = args.iter()
                   .map(ToString::to_string)
                   .collect::<Vec<_>>()
                   .join(" ");
    println!("{line}");
    Ok(Value::Null)
}

/// Returns the length of a string (in characters) or a list.
#[allow(clippy::cast_precision_loss)]
fn len(args: &[Value]) -> EvalResult<Value> {
    let length = match &args[0] {
        Value::Str(value) => value.chars().count(),
        Value::List(values) => values.borrow().len(),
        other => return Err(RuntimeError::ExpectedList { found: other.kind().to_string(), }),
    };

    Ok(Value::Number(length as f64))
}

/// Returns the runtime kind name of the argument.
fn type_of(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Str(args[0].kind().to_string()))
}

/// Returns the formatter output for the argument: lists render as
/// `[e1, e2, ...]`, strings unquoted, `null` as `null`.
fn stringify(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Str(args[0].to_string()))
}

/// Converts the argument to a number.
///
/// Numbers pass through unchanged, strings are parsed (a parse failure is a
/// runtime error) and booleans map to `0`/`1`. Everything else is rejected.
fn to_number(args: &[Value]) -> EvalResult<Value> {
    match &args[0] {
        Value::Number(value) => Ok(Value::Number(*value)),
        Value::Bool(value) => Ok(Value::Number(f64::from(u8::from(*value)))),
        Value::Str(value) => match value.trim().parse::<f64>() {
            Ok(parsed) => Ok(Value::Number(parsed)),
            Err(_) => Err(RuntimeError::NumberParse { value: value.clone(), }),
        },
        other => Err(RuntimeError::NumberParse { value: other.to_string(), }),
    }
}

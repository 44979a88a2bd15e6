use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Evaluates a binary operator applied to two already-evaluated values.
///
/// Equality works on any pair of values (scalars by value, lists by
/// reference). Ordering and arithmetic require two numbers. Division and
/// modulo reject a zero divisor. When both operands are integral, division
/// truncates toward zero so integer arithmetic stays integral.
///
/// # Errors
/// - `ExpectedNumber` for non-numeric ordering or arithmetic operands.
/// - `DivisionByZero` / `ModuloByZero` for a zero divisor.
///
/// # Example
/// ```
/// use jal::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::eval_binary, value::Value},
/// };
///
/// let quotient = eval_binary(BinaryOperator::Div,
///                            &Value::Number(7.0),
///                            &Value::Number(2.0)).unwrap();
///
/// assert_eq!(quotient, Value::Number(3.0));
/// ```
pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    match op {
        BinaryOperator::Equal => Ok(Value::Bool(left.value_eq(right))),
        BinaryOperator::NotEqual => Ok(Value::Bool(!left.value_eq(right))),

        BinaryOperator::Less
        | BinaryOperator::LessEqual
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEqual => {
            let left = left.as_number()?;
            let right = right.as_number()?;

            let result = match op {
                BinaryOperator::Less => left < right,
                BinaryOperator::LessEqual => left <= right,
                BinaryOperator::Greater => left > right,
                BinaryOperator::GreaterEqual => left >= right,
                _ => unreachable!(),
            };
            Ok(Value::Bool(result))
        },

        BinaryOperator::Add
        | BinaryOperator::Sub
        | BinaryOperator::Mul
        | BinaryOperator::Div
        | BinaryOperator::Mod => {
            let left = left.as_number()?;
            let right = right.as_number()?;
            eval_arithmetic(op, left, right)
        },
    }
}

/// Applies an arithmetic operator to two numbers.
fn eval_arithmetic(op: BinaryOperator, left: f64, right: f64) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Sub => left - right,
        BinaryOperator::Mul => left * right,

        BinaryOperator::Div => {
            if right == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }

            let quotient = left / right;
            if left.fract() == 0.0 && right.fract() == 0.0 {
                quotient.trunc()
            } else {
                quotient
            }
        },

        BinaryOperator::Mod => {
            if right == 0.0 {
                return Err(RuntimeError::ModuloByZero);
            }
            left % right
        },

        _ => unreachable!("eval_binary dispatches only arithmetic operators here"),
    };

    Ok(Value::Number(result))
}

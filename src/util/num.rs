use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Converts a runtime number to a list position.
///
/// Fractional indices are a runtime error. Negative or absurdly large
/// indices are valid *expressions* that simply miss every element, so they
/// come back as `None` and index accesses produce `null` for them.
///
/// ## Errors
/// Returns `RuntimeError::NonIntegerIndex` when `value` has a fractional
/// part or is not finite.
///
/// ## Example
/// ```
/// use jal::util::num::list_index;
///
/// assert_eq!(list_index(2.0).unwrap(), Some(2));
/// assert_eq!(list_index(-1.0).unwrap(), None);
/// assert!(list_index(0.5).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn list_index(value: f64) -> EvalResult<Option<usize>> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(RuntimeError::NonIntegerIndex);
    }

    if value < 0.0 || value > usize::MAX as f64 {
        return Ok(None);
    }

    Ok(Some(value as usize))
}

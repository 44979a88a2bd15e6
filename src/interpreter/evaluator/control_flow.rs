use crate::{
    ast::{Expr, Statement},
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        value::Value,
    },
};

impl Context {
    /// Executes an `if` statement.
    ///
    /// The condition is coerced with the truthiness rules; the chosen branch
    /// runs as a block. Without an alternate, a falsy condition is a no-op.
    pub(crate) fn exec_if(&mut self,
                          condition: &Expr,
                          consequent: &[Statement],
                          alternate: Option<&[Statement]>)
                          -> EvalResult<Flow> {
        if self.eval_expr(condition)?.is_truthy() {
            self.exec_block(consequent)
        } else if let Some(alternate) = alternate {
            self.exec_block(alternate)
        } else {
            Ok(Flow::Normal)
        }
    }

    /// Executes a `while` statement.
    ///
    /// The condition is re-evaluated before every iteration; each iteration
    /// runs the body as its own block. A `Return` from the body breaks the
    /// loop and keeps unwinding.
    pub(crate) fn exec_while(&mut self,
                             condition: &Expr,
                             body: &[Statement])
                             -> EvalResult<Flow> {
        while self.eval_expr(condition)?.is_truthy() {
            if let Flow::Return(value) = self.exec_block(body)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }

    /// Executes a `for` statement over a list.
    ///
    /// Each iteration pushes a fresh scope and binds the loop variable
    /// immutably to the element (or to the index for the `of` form). The
    /// element sequence is snapshotted up front, so pushes to the iterated
    /// list from inside the body do not extend the loop.
    pub(crate) fn exec_for(&mut self,
                           variable: &str,
                           iterable: &Expr,
                           body: &[Statement],
                           is_index: bool)
                           -> EvalResult<Flow> {
        let list = self.eval_expr(iterable)?.as_list()?;
        let elements: Vec<Value> = list.borrow().clone();

        for (index, element) in elements.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let bound = if is_index {
                Value::Number(index as f64)
            } else {
                element
            };

            self.push_scope();
            let flow = self.define_local(variable, bound, false)
                           .and_then(|()| self.exec_sequence(body));
            self.pop_scope();

            if let Flow::Return(value) = flow? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }
}

use crate::{
    ast::{Expr, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            builtins,
            core::{Context, EvalResult, Flow},
        },
        value::Value,
    },
};

impl Context {
    /// Evaluates a function call expression.
    ///
    /// Arguments are evaluated left to right before dispatch. Builtins are
    /// resolved before the user function table.
    pub(crate) fn eval_call(&mut self, name: &str, arguments: &[Expr]) -> EvalResult<Value> {
        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.eval_expr(argument)?);
        }

        if let Some(builtin) = builtins::find(name) {
            if !builtin.arity.check(args.len()) {
                return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(), });
            }
            return (builtin.func)(&args);
        }

        self.call_function(name, args)
    }

    /// Calls a user-defined function with already-evaluated arguments.
    ///
    /// The call frame is parented to the global root: every frame above the
    /// global scope is set aside for the duration of the call, so the callee
    /// sees globals and its own locals but never the caller's locals. The
    /// saved frames are restored on every exit path.
    ///
    /// A function body that finishes without hitting `return` produces
    /// `null`.
    ///
    /// # Errors
    /// - `UndefinedFunction` for an unregistered name.
    /// - `ArgumentCountMismatch` when arity differs.
    /// - `StackOverflow` when the call depth limit is exceeded.
    pub fn call_function(&mut self, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        let def = self.functions
                      .get(name)
                      .cloned()
                      .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_string(), })?;

        if args.len() != def.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(), });
        }

        if self.frame_depth >= self.max_depth {
            return Err(RuntimeError::StackOverflow { limit: self.max_depth, });
        }
        self.frame_depth += 1;

        let saved_frames = self.scope_stack.split_off(1);
        self.push_scope();

        let flow = self.bind_and_run(&def, args);

        self.pop_scope();
        self.scope_stack.extend(saved_frames);
        self.frame_depth -= 1;

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Null),
        }
    }

    /// Binds the parameters immutably in the fresh call frame, then runs
    /// the body.
    fn bind_and_run(&mut self, def: &FunctionDef, args: Vec<Value>) -> EvalResult<Flow> {
        for (param, value) in def.params.iter().zip(args) {
            self.define_local(&param.name, value, false)?;
        }

        self.exec_sequence(&def.body)
    }
}

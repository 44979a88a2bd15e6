use std::collections::HashMap;

use serde::Serialize;

use crate::{
    ast::{Expr, FunctionDef, Program, Statement},
    error::RuntimeError,
    interpreter::value::Value,
    util::num::list_index,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default maximum number of simultaneously active call frames.
pub const MAX_FRAME_DEPTH: usize = 10_000;

/// The outcome of executing one statement.
///
/// `Return` unwinds through enclosing blocks and loops up to the nearest
/// function call, which consumes it and turns the carried value into the
/// call's result.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Continue with the next statement.
    Normal,
    /// Unwind to the enclosing function call with this value.
    Return(Value),
}

/// A variable binding: its current value and whether it may be reassigned.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The bound value.
    pub value: Value,
    /// `false` for `const` bindings, parameters and loop variables.
    pub mutable: bool,
}

/// One record of the execution step log.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    /// Position of the step in execution order.
    pub index: usize,
    /// The executed statement's kind.
    pub kind: &'static str,
    /// A short rendering of the statement's subject, where one exists.
    pub detail: String,
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the scope stack (the global
/// frame at the bottom, one map per open block or call frame above it), the
/// registered user functions, the call depth counter and the optional step
/// log.
///
/// ## Usage
///
/// `Context` is created once per program run. [`Context::run`] drives the
/// full execution protocol; the individual `exec_*`/`eval_*` methods are
/// public enough for tests to exercise fragments directly.
pub struct Context {
    pub(crate) scope_stack: Vec<HashMap<String, Binding>>,
    /// A mapping from function names to their declarations, filled by the
    /// registration pass before any statement executes.
    pub(crate) functions: HashMap<String, FunctionDef>,
    pub(crate) frame_depth: usize,
    pub(crate) max_depth: usize,
    pub(crate) steps: Option<Vec<Step>>,
}

#[allow(clippy::new_without_default)]
impl Context {
    /// Creates a context with an empty global scope, no functions and the
    /// default call depth limit.
    #[must_use]
    pub fn new() -> Self {
        Self { scope_stack: vec![HashMap::new()],
               functions:   HashMap::new(),
               frame_depth: 0,
               max_depth:   MAX_FRAME_DEPTH,
               steps:       None, }
    }

    /// Enables the execution step log.
    #[must_use]
    pub fn with_trace(mut self) -> Self {
        self.steps = Some(Vec::new());
        self
    }

    /// Overrides the maximum call depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The recorded step log, when tracing is enabled.
    #[must_use]
    pub fn steps(&self) -> Option<&[Step]> {
        self.steps.as_deref()
    }

    /// Runs a checked program.
    ///
    /// The protocol has three stages:
    /// 1. every top-level function declaration is registered,
    /// 2. every other top-level statement runs, except bare expression
    ///    statements, which are skipped by design,
    /// 3. if a function named `main` exists it is invoked with no arguments.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] raised; execution stops there.
    ///
    /// # Example
    /// ```
    /// use jal::interpreter::{
    ///     checker::core::check, evaluator::core::Context, lexer::tokenize, parser::core::parse,
    /// };
    ///
    /// let tokens = tokenize("let x := 2 + 3 * 4").unwrap();
    /// let program = parse(&tokens).unwrap();
    /// assert!(check(&program).is_empty());
    ///
    /// let mut context = Context::new();
    /// context.run(&program).unwrap();
    ///
    /// assert_eq!(context.get_variable("x").unwrap().as_number().unwrap(), 14.0);
    /// ```
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        for statement in &program.body {
            if let Statement::Function(def) = statement {
                self.functions.insert(def.name.clone(), def.clone());
            }
        }

        for statement in &program.body {
            match statement {
                Statement::Function(_) | Statement::Expression { .. } => {},
                other => {
                    self.exec_statement(other)?;
                },
            }
        }

        if self.functions.contains_key("main") {
            self.call_function("main", Vec::new())?;
        }

        Ok(())
    }

    /// Executes a single statement.
    ///
    /// # Errors
    /// Propagates any [`RuntimeError`] from the statement or the
    /// expressions inside it.
    pub fn exec_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        self.record_step(statement);

        match statement {
            Statement::VariableDeclaration { name,
                                             mutable,
                                             initializer,
                                             .. } => {
                let value = self.eval_expr(initializer)?;
                self.define_local(name, value, *mutable)?;
                Ok(Flow::Normal)
            },

            Statement::Assignment { name, value } => {
                let value = self.eval_expr(value)?;
                self.assign(name, value)?;
                Ok(Flow::Normal)
            },

            Statement::Expression { expr } => {
                self.eval_expr(expr)?;
                Ok(Flow::Normal)
            },

            Statement::Block { body } => self.exec_block(body),

            Statement::Function(def) => {
                self.functions.insert(def.name.clone(), def.clone());
                Ok(Flow::Normal)
            },

            Statement::ListPush { target, value } => {
                self.exec_list_push(target, value)?;
                Ok(Flow::Normal)
            },

            Statement::Return { argument } => {
                let value = match argument {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            },

            Statement::If { condition,
                            consequent,
                            alternate, } => {
                self.exec_if(condition, consequent, alternate.as_deref())
            },

            Statement::While { condition, body } => self.exec_while(condition, body),

            Statement::For { variable,
                             iterable,
                             body,
                             is_index, } => self.exec_for(variable, iterable, body, *is_index),
        }
    }

    /// Executes a statement sequence, stopping early on `Return`.
    pub(crate) fn exec_sequence(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        for statement in statements {
            if let Flow::Return(value) = self.exec_statement(statement)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a statement sequence inside a fresh scope.
    ///
    /// The scope is popped on every exit path, including errors, so the
    /// environment chain depth is balanced around any statement.
    pub(crate) fn exec_block(&mut self, body: &[Statement]) -> EvalResult<Flow> {
        self.push_scope();
        let flow = self.exec_sequence(body);
        self.pop_scope();
        flow
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation; it dispatches
    /// on the expression variant.
    ///
    /// # Errors
    /// Propagates any [`RuntimeError`] raised by subexpressions.
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value } => Ok(Value::from(value)),

            Expr::Variable { name } => match self.get_variable(name) {
                Some(value) => Ok(value.clone()),
                None => Err(RuntimeError::UndefinedVariable { name: name.clone(), }),
            },

            Expr::Binary { left, op, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                crate::interpreter::evaluator::binary::eval_binary(*op, &left, &right)
            },

            Expr::Call { name, arguments } => self.eval_call(name, arguments),

            Expr::List { elements } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval_expr(element)?);
                }
                Ok(Value::from(values))
            },

            Expr::Index { object, index } => self.eval_index(object, index),
        }
    }

    /// Evaluates an index access.
    ///
    /// The object must be a list and the index an integral number. An index
    /// outside the list's bounds yields `null` rather than an error.
    fn eval_index(&mut self, object: &Expr, index: &Expr) -> EvalResult<Value> {
        let object = self.eval_expr(object)?;
        let index = self.eval_expr(index)?;

        let list = object.as_list()?;
        let index = index.as_number()?;

        match list_index(index)? {
            Some(position) => {
                let values = list.borrow();
                Ok(values.get(position).cloned().unwrap_or(Value::Null))
            },
            None => Ok(Value::Null),
        }
    }

    /// Executes a `<<` statement.
    ///
    /// The target must evaluate to a list. A list value on the right-hand
    /// side is spread-appended element by element; anything else is pushed
    /// as a single element. Mutation happens in place on the shared list.
    fn exec_list_push(&mut self, target: &Expr, value: &Expr) -> EvalResult<()> {
        let target = self.eval_expr(target)?;
        let value = self.eval_expr(value)?;

        let list = target.as_list()?;

        match value {
            Value::List(pushed) => {
                // Clone the elements up front; the pushed list may alias the
                // target.
                let elements: Vec<Value> = pushed.borrow().clone();
                list.borrow_mut().extend(elements);
            },
            other => list.borrow_mut().push(other),
        }

        Ok(())
    }

    /// Pushes a new local scope.
    pub(crate) fn push_scope(&mut self) {
        self.scope_stack.push(HashMap::new());
    }

    /// Removes the innermost local scope.
    pub(crate) fn pop_scope(&mut self) {
        self.scope_stack.pop();
    }

    /// Retrieves a variable from the current scope stack.
    ///
    /// Lookup begins at the innermost scope and proceeds outward toward the
    /// global scope. Returns `None` if the variable is not bound in any
    /// active scope.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.scope_stack
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).map(|binding| &binding.value))
    }

    /// Defines a variable in the current (innermost) scope.
    ///
    /// # Errors
    /// `DuplicateVariable` when the name already exists in this scope.
    pub(crate) fn define_local(&mut self,
                               name: &str,
                               value: Value,
                               mutable: bool)
                               -> EvalResult<()> {
        let scope = self.scope_stack
                        .last_mut()
                        .expect("at least the global scope");
        if scope.contains_key(name) {
            return Err(RuntimeError::DuplicateVariable { name: name.to_string(), });
        }

        scope.insert(name.to_string(), Binding { value, mutable });
        Ok(())
    }

    /// Assigns to the nearest scope containing the variable.
    ///
    /// # Errors
    /// - `UndefinedVariable` when no scope binds the name.
    /// - `AssignmentToImmutable` when the binding is not mutable.
    pub(crate) fn assign(&mut self, name: &str, value: Value) -> EvalResult<()> {
        for scope in self.scope_stack.iter_mut().rev() {
            if let Some(binding) = scope.get_mut(name) {
                if !binding.mutable {
                    return Err(RuntimeError::AssignmentToImmutable { name: name.to_string(), });
                }
                binding.value = value;
                return Ok(());
            }
        }

        Err(RuntimeError::UndefinedVariable { name: name.to_string(), })
    }

    /// Appends a record to the step log, when tracing is enabled.
    fn record_step(&mut self, statement: &Statement) {
        if let Some(steps) = &mut self.steps {
            let index = steps.len();
            steps.push(Step { index,
                              kind: statement.kind(),
                              detail: describe(statement), });
        }
    }
}

/// A short rendering of a statement's subject for the step log.
fn describe(statement: &Statement) -> String {
    match statement {
        Statement::VariableDeclaration { name, .. }
        | Statement::Assignment { name, .. }
        | Statement::For { variable: name, .. } => name.clone(),
        Statement::Function(def) => def.name.clone(),
        _ => String::new(),
    }
}

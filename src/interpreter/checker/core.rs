use std::collections::HashMap;

use crate::{
    ast::{Expr, FunctionDef, Parameter, Program, Statement, TypeAnnotation},
    error::TypeError,
    interpreter::checker::scope::{PendingVisibility, Symbol, SymbolTable},
};

/// The registered signature of a declared function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSymbol {
    /// The declared parameters, in order.
    pub params: Vec<Parameter>,
    /// The declared return type.
    pub return_type: TypeAnnotation,
}

/// Walks a parsed [`Program`] and validates all static typing rules.
///
/// The checker makes two passes: first every function declaration is
/// registered with its signature so calls may reference functions declared
/// later; then each statement is checked in order. Within any statement
/// sequence, variable declarations are registered up front so statements in
/// the same block see each other's types.
///
/// Diagnostics are accumulated into an ordered list; the checker never
/// aborts on the first error. The program may only execute when the list
/// comes back empty.
pub struct TypeChecker {
    pub(crate) symbols: SymbolTable,
    pub(crate) functions: HashMap<String, FunctionSymbol>,
    pub(crate) errors: Vec<TypeError>,
    pub(crate) current_return: Option<TypeAnnotation>,
    pub(crate) quiet: usize,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-checks a program and returns the ordered list of diagnostics.
///
/// An empty list means the program is well-typed.
///
/// # Example
/// ```
/// use jal::interpreter::{checker::core::check, lexer::tokenize, parser::core::parse};
///
/// let tokens = tokenize("const k := 1 k = 2").unwrap();
/// let program = parse(&tokens).unwrap();
/// let errors = check(&program);
///
/// assert_eq!(errors.len(), 1);
/// assert!(errors[0].to_string().contains("immutable"));
/// ```
#[must_use]
pub fn check(program: &Program) -> Vec<TypeError> {
    let mut checker = TypeChecker::new();
    checker.check_program(program);
    checker.errors
}

impl TypeChecker {
    /// Creates a checker with an empty global scope and function table.
    #[must_use]
    pub fn new() -> Self {
        Self { symbols: SymbolTable::new(),
               functions: HashMap::new(),
               errors: Vec::new(),
               current_return: None,
               quiet: 0, }
    }

    /// Runs both checker passes over a program.
    pub fn check_program(&mut self, program: &Program) {
        self.register_functions(&program.body);
        self.check_sequence(&program.body);
    }

    /// Records a diagnostic unless quiet inference is active.
    pub(crate) fn report(&mut self, error: TypeError) {
        if self.quiet == 0 {
            self.errors.push(error);
        }
    }

    /// Infers an expression type without recording diagnostics.
    ///
    /// Used by the pre-registration pass; the later textual check reports
    /// the real errors exactly once.
    pub(crate) fn infer_quiet(&mut self, expr: &Expr) -> Option<TypeAnnotation> {
        self.quiet += 1;
        let inferred = self.check_expr(expr);
        self.quiet -= 1;
        inferred
    }

    /// Resolves a name under the current phase's pending-binding rules.
    ///
    /// Pre-registration inference sees every binding registered so far
    /// (the textually earlier part of the sequence). A function body also
    /// sees pending globals, because every top-level declaration runs
    /// before any call. Plain statement position sees only bindings whose
    /// declarations were already reached, which is exactly what exists at
    /// runtime when the statement executes.
    pub(crate) fn resolve_symbol(&self, name: &str) -> Option<&Symbol> {
        let visibility = if self.quiet > 0 {
            PendingVisibility::All
        } else if self.current_return.is_some() {
            PendingVisibility::Globals
        } else {
            PendingVisibility::Hidden
        };

        self.symbols.resolve(name, visibility)
    }

    /// Registers every function declaration, recursively.
    ///
    /// Duplicate names are rejected with a diagnostic; the first declaration
    /// wins.
    fn register_functions(&mut self, body: &[Statement]) {
        for statement in body {
            match statement {
                Statement::Function(def) => {
                    if self.functions.contains_key(&def.name) {
                        self.report(TypeError::DuplicateFunction { name: def.name.clone(), });
                    } else {
                        self.functions
                            .insert(def.name.clone(),
                                    FunctionSymbol { params:      def.params.clone(),
                                                     return_type: def.return_type.clone(), });
                    }
                    self.register_functions(&def.body);
                },
                Statement::Block { body } | Statement::While { body, .. } => {
                    self.register_functions(body);
                },
                Statement::For { body, .. } => self.register_functions(body),
                Statement::If { consequent,
                                alternate, .. } => {
                    self.register_functions(consequent);
                    if let Some(alternate) = alternate {
                        self.register_functions(alternate);
                    }
                },
                _ => {},
            }
        }
    }

    /// Checks a statement sequence.
    ///
    /// Declarations in the sequence are registered first, as pending
    /// bindings: duplicate and shadowing violations surface once per
    /// sequence, pre-registration inference can type each initializer
    /// against its textually earlier siblings, and pending *globals* stay
    /// visible to function bodies checked later. Then every statement is
    /// checked in order, activating each binding when its declaration is
    /// reached; a still-pending binding is invisible from plain statement
    /// position, matching the evaluator's strictly in-order execution.
    pub(crate) fn check_sequence(&mut self, statements: &[Statement]) {
        for statement in statements {
            if let Statement::VariableDeclaration { name,
                                                    mutable,
                                                    type_annotation,
                                                    initializer, } = statement
            {
                let inferred = match type_annotation {
                    Some(annotation) => annotation.clone(),
                    None => self.infer_quiet(initializer).unwrap_or(TypeAnnotation::Void),
                };

                if let Err(error) = self.symbols.define(name, inferred, *mutable, true) {
                    self.report(error);
                }
            }
        }

        for statement in statements {
            self.check_statement(statement);
        }
    }

    /// Checks a single statement.
    fn check_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VariableDeclaration { name,
                                             type_annotation,
                                             initializer,
                                             .. } => {
                let initializer_type = self.check_expr(initializer);

                if let (Some(declared), Some(found)) = (type_annotation, initializer_type)
                   && !declared.matches(&found)
                {
                    self.report(TypeError::DeclarationTypeMismatch { name: name.clone(),
                                                                     declared: declared.clone(),
                                                                     found });
                }

                // The initializer above still resolved the old binding, if
                // any; the new one exists from here on.
                self.symbols.activate(name);
            },

            Statement::Assignment { name, value } => {
                let value_type = self.check_expr(value);

                match self.resolve_symbol(name).cloned() {
                    None => self.report(TypeError::UndefinedVariable { name: name.clone(), }),
                    Some(symbol) if !symbol.mutable => {
                        self.report(TypeError::AssignmentToImmutable { name: name.clone(), });
                    },
                    Some(symbol) => {
                        if let Some(found) = value_type
                           && !symbol.type_annotation.matches(&found)
                        {
                            self.report(TypeError::AssignmentTypeMismatch {
                                name: name.clone(),
                                expected: symbol.type_annotation,
                                found,
                            });
                        }
                    },
                }
            },

            Statement::Expression { expr } => {
                self.check_expr(expr);
            },

            Statement::Block { body } => {
                self.symbols.push_scope();
                self.check_sequence(body);
                self.symbols.pop_scope();
            },

            Statement::Function(def) => self.check_function(def),

            Statement::ListPush { target, value } => self.check_list_push(target, value),

            Statement::Return { argument } => self.check_return(argument.as_ref()),

            Statement::If { condition,
                            consequent,
                            alternate, } => {
                self.check_condition(condition);

                self.symbols.push_scope();
                self.check_sequence(consequent);
                self.symbols.pop_scope();

                if let Some(alternate) = alternate {
                    self.symbols.push_scope();
                    self.check_sequence(alternate);
                    self.symbols.pop_scope();
                }
            },

            Statement::While { condition, body } => {
                self.check_condition(condition);

                self.symbols.push_scope();
                self.check_sequence(body);
                self.symbols.pop_scope();
            },

            Statement::For { variable,
                             iterable,
                             body,
                             is_index, } => {
                let iterable_type = self.check_expr(iterable);

                let element = match iterable_type {
                    Some(TypeAnnotation::List { element }) => *element,
                    Some(found) => {
                        self.report(TypeError::IterableNotList { found });
                        TypeAnnotation::Void
                    },
                    None => TypeAnnotation::Void,
                };

                let variable_type = if *is_index {
                    TypeAnnotation::Int { bits: 32 }
                } else {
                    element
                };

                self.symbols.push_scope();
                if let Err(error) = self.symbols.define(variable, variable_type, false, false) {
                    self.report(error);
                }
                self.check_sequence(body);
                self.symbols.pop_scope();
            },
        }
    }

    /// Checks a function body under its declared return type.
    ///
    /// The symbol table is isolated the same way the evaluator isolates a
    /// call frame: every scope above the global one is set aside, so a
    /// nested declaration cannot resolve an enclosing body's locals that
    /// its own call frame will not hold. Parameters are bound immutably in
    /// a fresh scope. `current_return` is saved and restored so nested
    /// declarations check against their own signature.
    fn check_function(&mut self, def: &FunctionDef) {
        let saved_scopes = self.symbols.isolate();
        self.symbols.push_scope();
        for param in &def.params {
            if let Err(error) =
                self.symbols
                    .define(&param.name, param.type_annotation.clone(), false, false)
            {
                self.report(error);
            }
        }

        let previous_return = self.current_return
                                  .replace(def.return_type.clone());
        self.check_sequence(&def.body);
        self.current_return = previous_return;

        self.symbols.pop_scope();
        self.symbols.restore(saved_scopes);
    }

    /// Checks a `return` statement against the enclosing function.
    fn check_return(&mut self, argument: Option<&Expr>) {
        let Some(expected) = self.current_return.clone() else {
            self.report(TypeError::ReturnOutsideFunction);
            if let Some(expr) = argument {
                self.check_expr(expr);
            }
            return;
        };

        match argument {
            None => {
                if expected != TypeAnnotation::Void {
                    self.report(TypeError::MissingReturnValue { expected });
                }
            },
            Some(expr) => {
                if let Some(found) = self.check_expr(expr)
                   && !expected.matches(&found)
                {
                    self.report(TypeError::ReturnTypeMismatch { expected, found });
                }
            },
        }
    }

    /// Checks a `<<` statement: list target, mutability, element type.
    fn check_list_push(&mut self, target: &Expr, value: &Expr) {
        let target_type = self.check_expr(target);
        let value_type = self.check_expr(value);

        if let Expr::Variable { name } = target {
            let immutable = self.resolve_symbol(name)
                                .is_some_and(|symbol| !symbol.mutable);
            if immutable {
                self.report(TypeError::AssignmentToImmutable { name: name.clone(), });
            }
        }

        let element = match target_type {
            Some(TypeAnnotation::List { element }) => *element,
            Some(found) => {
                self.report(TypeError::PushToNonList { found });
                return;
            },
            None => return,
        };

        if element == TypeAnnotation::Void {
            return;
        }

        // A pushed list is spread-appended, so a list of matching elements
        // is as acceptable as a single element.
        if let Some(found) = value_type {
            let matches_element = element.matches(&found);
            let matches_spread = match &found {
                TypeAnnotation::List { element: pushed } => element.matches(pushed),
                _ => false,
            };

            if !matches_element && !matches_spread {
                self.report(TypeError::ListPushMismatch { expected: element,
                                                          found });
            }
        }
    }

    /// Checks that a condition expression has type `bool`.
    fn check_condition(&mut self, condition: &Expr) {
        if let Some(found) = self.check_expr(condition)
           && found != TypeAnnotation::Bool
        {
            self.report(TypeError::ConditionNotBool { found });
        }
    }
}

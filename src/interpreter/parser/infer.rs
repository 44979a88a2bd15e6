use std::collections::HashMap;

use crate::{
    ast::{Expr, Program, Statement, TypeAnnotation},
    interpreter::{checker::builtins::builtin_return_type, parser::binary::is_comparison_op},
};

/// One level of the inference pass's scope chain: name to inferred type.
type TypeScope = HashMap<String, TypeAnnotation>;

/// Fills the missing type annotations on `:=` declarations.
///
/// This advisory pass walks the freshly parsed AST with a scope chain that
/// mirrors block, loop and function scopes. Function return types are
/// gathered globally first so initializers that call a function declared
/// later still infer correctly.
///
/// Annotations that cannot be derived (an undefined variable, say) are left
/// as `None`; the type checker re-derives everything authoritatively and
/// reports the actual diagnostics.
pub fn annotate_types(program: &mut Program) {
    let mut functions = HashMap::new();
    collect_function_returns(&program.body, &mut functions);

    let mut scopes = vec![TypeScope::new()];
    annotate_sequence(&mut program.body, &mut scopes, &functions);
}

/// Records the return type of every function declaration, recursively.
fn collect_function_returns(body: &[Statement], functions: &mut HashMap<String, TypeAnnotation>) {
    for statement in body {
        match statement {
            Statement::Function(def) => {
                functions.entry(def.name.clone())
                         .or_insert_with(|| def.return_type.clone());
                collect_function_returns(&def.body, functions);
            },
            Statement::Block { body } | Statement::While { body, .. } => {
                collect_function_returns(body, functions);
            },
            Statement::For { body, .. } => collect_function_returns(body, functions),
            Statement::If { consequent,
                            alternate, .. } => {
                collect_function_returns(consequent, functions);
                if let Some(alternate) = alternate {
                    collect_function_returns(alternate, functions);
                }
            },
            _ => {},
        }
    }
}

fn annotate_sequence(statements: &mut [Statement],
                     scopes: &mut Vec<TypeScope>,
                     functions: &HashMap<String, TypeAnnotation>) {
    for statement in statements {
        annotate_statement(statement, scopes, functions);
    }
}

fn annotate_statement(statement: &mut Statement,
                      scopes: &mut Vec<TypeScope>,
                      functions: &HashMap<String, TypeAnnotation>) {
    match statement {
        Statement::VariableDeclaration { name,
                                         type_annotation,
                                         initializer,
                                         .. } => {
            if type_annotation.is_none() {
                *type_annotation = infer_expr(initializer, scopes, functions);
            }
            if let Some(annotation) = type_annotation {
                scopes.last_mut()
                      .expect("at least the global scope")
                      .insert(name.clone(), annotation.clone());
            }
        },

        Statement::Block { body } => {
            scopes.push(TypeScope::new());
            annotate_sequence(body, scopes, functions);
            scopes.pop();
        },

        Statement::Function(def) => {
            let mut params = TypeScope::new();
            for param in &def.params {
                params.insert(param.name.clone(), param.type_annotation.clone());
            }

            scopes.push(params);
            annotate_sequence(&mut def.body, scopes, functions);
            scopes.pop();
        },

        Statement::If { consequent,
                        alternate, .. } => {
            scopes.push(TypeScope::new());
            annotate_sequence(consequent, scopes, functions);
            scopes.pop();

            if let Some(alternate) = alternate {
                scopes.push(TypeScope::new());
                annotate_sequence(alternate, scopes, functions);
                scopes.pop();
            }
        },

        Statement::While { body, .. } => {
            scopes.push(TypeScope::new());
            annotate_sequence(body, scopes, functions);
            scopes.pop();
        },

        Statement::For { variable,
                         iterable,
                         body,
                         is_index, } => {
            let element = if *is_index {
                Some(TypeAnnotation::Int { bits: 32 })
            } else {
                match infer_expr(iterable, scopes, functions) {
                    Some(TypeAnnotation::List { element }) => Some(*element),
                    _ => None,
                }
            };

            let mut scope = TypeScope::new();
            if let Some(element) = element {
                scope.insert(variable.clone(), element);
            }

            scopes.push(scope);
            annotate_sequence(body, scopes, functions);
            scopes.pop();
        },

        Statement::Assignment { .. }
        | Statement::Expression { .. }
        | Statement::ListPush { .. }
        | Statement::Return { .. } => {},
    }
}

/// Best-effort type of an expression, or `None` when it cannot be derived.
///
/// Mirrors the checker's typing rules: comparisons are `bool`, arithmetic
/// widens (integer division keeps the left type), calls resolve builtins
/// before the gathered function returns.
fn infer_expr(expr: &Expr,
              scopes: &[TypeScope],
              functions: &HashMap<String, TypeAnnotation>)
              -> Option<TypeAnnotation> {
    match expr {
        Expr::Literal { value } => Some(value.type_annotation()),

        Expr::Variable { name } => scopes.iter().rev().find_map(|scope| scope.get(name).cloned()),

        Expr::Binary { left, op, right } => {
            if is_comparison_op(*op) {
                return Some(TypeAnnotation::Bool);
            }

            let left = infer_expr(left, scopes, functions)?;
            let right = infer_expr(right, scopes, functions)?;
            if !left.is_numeric() || !right.is_numeric() {
                return None;
            }

            if matches!(op, crate::ast::BinaryOperator::Div)
               && matches!(left, TypeAnnotation::Int { .. })
               && matches!(right, TypeAnnotation::Int { .. })
            {
                Some(left)
            } else {
                Some(TypeAnnotation::wider(&left, &right))
            }
        },

        Expr::Call { name, .. } => {
            builtin_return_type(name).or_else(|| functions.get(name).cloned())
        },

        Expr::List { elements } => {
            let element = match elements.first() {
                Some(first) => infer_expr(first, scopes, functions)?,
                None => TypeAnnotation::Void,
            };
            Some(TypeAnnotation::List { element: Box::new(element), })
        },

        Expr::Index { object, .. } => match infer_expr(object, scopes, functions)? {
            TypeAnnotation::List { element } => Some(*element),
            _ => None,
        },
    }
}

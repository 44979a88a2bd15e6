use crate::{
    ast::{BinaryOperator, Expr, TypeAnnotation},
    error::TypeError,
    interpreter::{
        checker::{builtins::is_builtin, core::TypeChecker},
        parser::binary::is_comparison_op,
    },
};

impl TypeChecker {
    /// Derives the static type of an expression, recording diagnostics for
    /// every violation found on the way.
    ///
    /// Returns `None` when no type can be derived (an undefined variable,
    /// say); the failure itself has already been reported, so callers treat
    /// `None` as "skip dependent checks" rather than an error of its own.
    pub(crate) fn check_expr(&mut self, expr: &Expr) -> Option<TypeAnnotation> {
        match expr {
            Expr::Literal { value } => Some(value.type_annotation()),

            Expr::Variable { name } => match self.resolve_symbol(name) {
                Some(symbol) => Some(symbol.type_annotation.clone()),
                None => {
                    self.report(TypeError::UndefinedVariable { name: name.clone(), });
                    None
                },
            },

            Expr::Binary { left, op, right } => self.check_binary(left, *op, right),

            Expr::Call { name, arguments } => self.check_call(name, arguments),

            Expr::List { elements } => self.check_list(elements),

            Expr::Index { object, index } => self.check_index(object, index),
        }
    }

    /// Types a binary expression.
    ///
    /// Equality accepts any two values and ordering requires numbers; both
    /// produce `bool`. Arithmetic requires numbers and widens, except that
    /// integer division keeps the left operand's type.
    fn check_binary(&mut self,
                    left: &Expr,
                    op: BinaryOperator,
                    right: &Expr)
                    -> Option<TypeAnnotation> {
        let left_type = self.check_expr(left);
        let right_type = self.check_expr(right);

        if matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual) {
            return Some(TypeAnnotation::Bool);
        }

        let (left_type, right_type) = (left_type?, right_type?);

        if !left_type.is_numeric() || !right_type.is_numeric() {
            self.report(TypeError::BinaryOperandMismatch { op,
                                                           left: left_type,
                                                           right: right_type, });
            return if is_comparison_op(op) {
                Some(TypeAnnotation::Bool)
            } else {
                None
            };
        }

        if is_comparison_op(op) {
            return Some(TypeAnnotation::Bool);
        }

        if op == BinaryOperator::Div
           && matches!(left_type, TypeAnnotation::Int { .. })
           && matches!(right_type, TypeAnnotation::Int { .. })
        {
            // Integer division preserves the left operand's width.
            return Some(left_type);
        }

        Some(TypeAnnotation::wider(&left_type, &right_type))
    }

    /// Types a function call, builtins first, then the function table.
    fn check_call(&mut self, name: &str, arguments: &[Expr]) -> Option<TypeAnnotation> {
        if is_builtin(name) {
            return self.check_builtin_call(name, arguments);
        }

        let argument_types: Vec<Option<TypeAnnotation>> =
            arguments.iter().map(|arg| self.check_expr(arg)).collect();

        let Some(function) = self.functions.get(name).cloned() else {
            self.report(TypeError::UndefinedFunction { name: name.to_string(), });
            return None;
        };

        if arguments.len() != function.params.len() {
            self.report(TypeError::ArgumentCountMismatch { name: name.to_string(),
                                                           expected: function.params.len(),
                                                           found: arguments.len(), });
            return Some(function.return_type);
        }

        for (index, (argument, param)) in argument_types.iter()
                                                        .zip(&function.params)
                                                        .enumerate()
        {
            if let Some(found) = argument
               && !param.type_annotation.matches(found)
            {
                self.report(TypeError::ArgumentTypeMismatch {
                    name: name.to_string(),
                    index,
                    expected: param.type_annotation.clone(),
                    found: found.clone(),
                });
            }
        }

        Some(function.return_type)
    }

    /// Applies the builtin signature rules.
    ///
    /// `print` accepts anything; the other four take exactly one argument,
    /// and `len` restricts it to a string or list.
    fn check_builtin_call(&mut self, name: &str, arguments: &[Expr]) -> Option<TypeAnnotation> {
        let argument_types: Vec<Option<TypeAnnotation>> =
            arguments.iter().map(|arg| self.check_expr(arg)).collect();

        match name {
            "print" => Some(TypeAnnotation::Void),

            "len" => {
                if arguments.len() != 1 {
                    self.report(TypeError::ArgumentCountMismatch { name: name.to_string(),
                                                                   expected: 1,
                                                                   found: arguments.len(), });
                } else if let Some(found) = &argument_types[0]
                          && !matches!(found,
                                       TypeAnnotation::Str | TypeAnnotation::List { .. })
                {
                    self.report(TypeError::BuiltinArgMismatch { name: name.to_string(),
                                                                expected:
                                                                    "a string or a list".to_string(),
                                                                found: found.clone(), });
                }
                Some(TypeAnnotation::Int { bits: 32 })
            },

            "type" | "stringify" | "toNumber" => {
                if arguments.len() != 1 {
                    self.report(TypeError::ArgumentCountMismatch { name: name.to_string(),
                                                                   expected: 1,
                                                                   found: arguments.len(), });
                }
                if name == "toNumber" {
                    Some(TypeAnnotation::Int { bits: 32 })
                } else {
                    Some(TypeAnnotation::Str)
                }
            },

            _ => unreachable!("is_builtin gates the builtin names"),
        }
    }

    /// Types a list literal: empty lists have an unknown element type, and
    /// every element must share the first element's type.
    fn check_list(&mut self, elements: &[Expr]) -> Option<TypeAnnotation> {
        let element_types: Vec<Option<TypeAnnotation>> =
            elements.iter().map(|element| self.check_expr(element)).collect();

        let Some(first) = element_types.iter().flatten().next().cloned() else {
            return Some(TypeAnnotation::List { element: Box::new(TypeAnnotation::Void), });
        };

        for element in element_types.iter().flatten().skip(1) {
            if !first.matches(element) {
                self.report(TypeError::ListElementMismatch { expected: first.clone(),
                                                             found:    element.clone(), });
            }
        }

        Some(TypeAnnotation::List { element: Box::new(first), })
    }

    /// Types an index access: the object must be a list and the index an
    /// integer; the result is the list's element type.
    fn check_index(&mut self, object: &Expr, index: &Expr) -> Option<TypeAnnotation> {
        let object_type = self.check_expr(object);
        let index_type = self.check_expr(index);

        if let Some(found) = index_type
           && !matches!(found, TypeAnnotation::Int { .. })
        {
            self.report(TypeError::IndexNotInteger { found });
        }

        match object_type? {
            TypeAnnotation::List { element } => Some(*element),
            found => {
                self.report(TypeError::IndexNonList { found });
                None
            },
        }
    }
}

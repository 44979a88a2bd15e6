use std::collections::HashMap;

use crate::{ast::TypeAnnotation, error::TypeError};

/// A checked binding: its static type and whether it may be reassigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// The binding's static type.
    pub type_annotation: TypeAnnotation,
    /// `true` for `let` bindings, `false` for `const` and loop variables.
    pub mutable: bool,
    /// `true` while the binding is registered for its sequence but its
    /// declaration has not yet been reached in textual order.
    pub pending: bool,
}

/// How far pending (declared-later) bindings reach during resolution.
///
/// The evaluator executes a sequence strictly in order, so a binding only
/// exists at runtime once its declaration has run. Resolution mirrors that:
/// a pending binding is invisible from plain statement position, while a
/// function body may also see pending globals, since every top-level
/// declaration runs before `main` is invoked. Pre-registration inference
/// sees everything registered so far, which is exactly the textually
/// earlier part of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingVisibility {
    /// Every pending binding resolves.
    All,
    /// Only pending bindings in the global scope resolve.
    Globals,
    /// No pending binding resolves.
    Hidden,
}

/// The checker's scope stack: a global table plus one map per open scope.
///
/// Resolution walks from the innermost scope outward. Pending bindings that
/// the given [`PendingVisibility`] hides are skipped rather than shadowing,
/// so a pending inner binding never masks an already-declared outer one.
/// Definition enforces the declaration rules: a name may appear once per
/// scope, and shadowing an outer binding is only allowed when that binding
/// is mutable.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<HashMap<String, Symbol>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table containing only the global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes: vec![HashMap::new()], }
    }

    /// Opens a new innermost scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Closes the innermost scope, dropping its bindings.
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Sets aside every scope above the global one.
    ///
    /// Function bodies are checked against the global scope plus their own
    /// frame, matching the evaluator's call frame discipline: a callee
    /// never sees the caller's (or an enclosing body's) locals. The scopes
    /// returned here go back via [`SymbolTable::restore`].
    pub fn isolate(&mut self) -> Vec<HashMap<String, Symbol>> {
        self.scopes.split_off(1)
    }

    /// Restores scopes previously set aside by [`SymbolTable::isolate`].
    pub fn restore(&mut self, saved: Vec<HashMap<String, Symbol>>) {
        self.scopes.extend(saved);
    }

    /// Defines a name in the innermost scope.
    ///
    /// `pending` marks a binding registered ahead of its textual position;
    /// [`SymbolTable::activate`] clears it when the declaration is reached.
    ///
    /// # Errors
    /// - `DuplicateVariable` when the name already exists in the current
    ///   scope.
    /// - `ConstShadowed` when an outer scope holds an immutable binding of
    ///   the same name.
    pub fn define(&mut self,
                  name: &str,
                  type_annotation: TypeAnnotation,
                  mutable: bool,
                  pending: bool)
                  -> Result<(), TypeError> {
        let innermost = self.scopes.len() - 1;
        if self.scopes[innermost].contains_key(name) {
            return Err(TypeError::DuplicateVariable { name: name.to_string(), });
        }

        let shadows_const = self.scopes[..innermost].iter()
                                                    .any(|scope| {
                                                        scope.get(name)
                                                             .is_some_and(|symbol| !symbol.mutable)
                                                    });
        if shadows_const {
            return Err(TypeError::ConstShadowed { name: name.to_string(), });
        }

        self.scopes[innermost].insert(name.to_string(),
                                      Symbol { type_annotation,
                                               mutable,
                                               pending });
        Ok(())
    }

    /// Marks a binding in the innermost scope as reached.
    ///
    /// Called when the textual check arrives at the binding's declaration;
    /// from that point on it resolves from plain statement position too.
    pub fn activate(&mut self, name: &str) {
        if let Some(symbol) = self.scopes
                                  .last_mut()
                                  .expect("at least the global scope")
                                  .get_mut(name)
        {
            symbol.pending = false;
        }
    }

    /// Resolves a name, innermost scope first, then outward to the global
    /// scope.
    ///
    /// Pending bindings hidden by `pending` are passed over, letting an
    /// active outer binding of the same name apply instead.
    #[must_use]
    pub fn resolve(&self, name: &str, pending: PendingVisibility) -> Option<&Symbol> {
        for (index, scope) in self.scopes.iter().enumerate().rev() {
            if let Some(symbol) = scope.get(name) {
                let visible = !symbol.pending
                              || match pending {
                                  PendingVisibility::All => true,
                                  PendingVisibility::Globals => index == 0,
                                  PendingVisibility::Hidden => false,
                              };
                if visible {
                    return Some(symbol);
                }
            }
        }
        None
    }
}

use std::collections::HashMap;

use crate::{
    ast::DeclaredType,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// A variable slot: its declared type and current value.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The type fixed at declaration.
    pub ty:    DeclaredType,
    /// The current value, always compatible with `ty`.
    pub value: Value,
}

/// One level of the scope chain.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: HashMap<String, Binding>,
}

impl Scope {
    /// Adds a binding.
    ///
    /// # Errors
    /// Returns `AlreadyDeclared` if this scope already binds `name`; shadowing
    /// is only possible from an inner scope.
    pub fn define(&mut self, name: &str, binding: Binding, line: usize) -> EvalResult<()> {
        if self.bindings.contains_key(name) {
            return Err(RuntimeError::AlreadyDeclared { name: name.to_string(),
                                                       line });
        }
        self.bindings.insert(name.to_string(), binding);
        Ok(())
    }
}

/// The scopes visible to the running code.
///
/// Every function call gets its own frame whose outermost scope holds the
/// parameters; blocks push further scopes onto the current frame. Name lookup
/// searches the current frame from the innermost scope outwards and then the
/// global scope, so a function never sees the locals of its caller or of the
/// block it was declared in.
#[derive(Debug)]
pub struct Environment {
    globals: Scope,
    frames:  Vec<Vec<Scope>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self { globals: Scope::default(),
               frames:  vec![Vec::new()], }
    }
}

impl Environment {
    /// Binds a name in the global scope, replacing any previous binding.
    pub fn define_global(&mut self, name: &str, binding: Binding) {
        self.globals.bindings.insert(name.to_string(), binding);
    }

    /// Adds a binding to the innermost scope.
    ///
    /// # Errors
    /// Returns `AlreadyDeclared` if that scope already binds `name`.
    pub fn define(&mut self, name: &str, binding: Binding, line: usize) -> EvalResult<()> {
        self.current_mut().define(name, binding, line)
    }

    /// Finds the nearest binding of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.frame()
            .iter()
            .rev()
            .find_map(|scope| scope.bindings.get(name))
            .or_else(|| self.globals.bindings.get(name))
    }

    /// Finds the nearest binding of `name` for assignment.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Binding> {
        let Self { globals, frames } = self;

        frames.last_mut()
              .and_then(|frame| {
                  frame.iter_mut()
                       .rev()
                       .find_map(|scope| scope.bindings.get_mut(name))
              })
              .or_else(|| globals.bindings.get_mut(name))
    }

    /// Opens a block scope inside the current frame.
    pub fn push_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push(Scope::default());
        }
        tracing::trace!(depth = self.frame().len(), "pushed scope");
    }

    /// Closes the innermost block scope.
    pub fn pop_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.pop();
        }
        tracing::trace!(depth = self.frame().len(), "popped scope");
    }

    /// Enters a function call whose parameters live in `parameters`.
    pub fn push_frame(&mut self, parameters: Scope) {
        self.frames.push(vec![parameters]);
        tracing::trace!(frames = self.frames.len(), "pushed call frame");
    }

    /// Leaves the current function call, dropping all of its scopes.
    ///
    /// The top-level frame is never removed.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
        tracing::trace!(frames = self.frames.len(), "popped call frame");
    }

    /// Returns the number of function calls currently running.
    #[must_use]
    pub fn call_depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    fn frame(&self) -> &[Scope] {
        self.frames.last().map_or(&[], Vec::as_slice)
    }

    fn current_mut(&mut self) -> &mut Scope {
        match self.frames.last_mut().and_then(|frame| frame.last_mut()) {
            Some(scope) => scope,
            None => &mut self.globals,
        }
    }
}

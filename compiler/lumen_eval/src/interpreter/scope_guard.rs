//! RAII-style scope guards for Interpreter environment management.
//!
//! The [`ScopedInterpreter`] guard pushes a scope on creation and pops it
//! when dropped, so an error propagating out of a block with `?` still
//! leaves the environment balanced.
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`,
//! allowing transparent access to all interpreter methods.
//!
//! ```text
//! interpreter.with_env_scope(ScopeKind::Block, |scoped| {
//!     scoped.eval_statements(statements)
//! })
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::environment::ScopeKind;

/// RAII guard that pops the environment scope it pushed when dropped.
pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Push a scope of `kind` and return a guard that pops it on drop.
    pub fn scoped(&mut self, kind: ScopeKind) -> ScopedInterpreter<'_, 'a> {
        self.env.push_scope(kind);
        ScopedInterpreter { interpreter: self }
    }

    /// Execute `f` within a new environment scope.
    pub fn with_env_scope<T, F>(&mut self, kind: ScopeKind, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'a>) -> T,
    {
        let mut scoped = self.scoped(kind);
        f(&mut scoped)
    }
}

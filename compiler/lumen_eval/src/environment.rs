//! Environment for variable scoping in the interpreter.
//!
//! Uses a scope stack (not cloning) for efficient scope management. Every
//! scope is tagged with a [`ScopeKind`]: `var` declarations hoist to the
//! nearest `Function` or `Global` scope, `let` declarations bind in the
//! innermost scope, which may be a `Block`.
//!
//! # Re-declaration
//!
//! - `let x` where the current scope already binds `x` is rejected.
//! - `var x` where the hoisting target already holds `var x` is accepted and
//!   keeps the existing value.
//! - `var x` where the target, or any block scope crossed on the way out,
//!   holds `let x` is rejected.
//! - Function declarations bind like `var` in the current scope and replace
//!   an existing `var` or function binding; a `let` of the same name rejects them.
//! - Shadowing across scopes is always allowed.

// Rc is the intentional implementation detail of LocalScope<T>
#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of LocalScope<T>"
)]

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use lumen_ir::{DeclarationKind, Name};
use lumen_runtime::{Trace, Tracer, Value};

/// What introduced a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// The program's outermost scope.
    Global,
    /// A function call's scope; holds parameters and hoisted `var`s.
    Function,
    /// A braced block; holds `let`s only.
    Block,
}

impl ScopeKind {
    /// Whether `var` declarations stop here.
    #[inline]
    pub fn is_hoisting_target(self) -> bool {
        matches!(self, ScopeKind::Global | ScopeKind::Function)
    }
}

/// Error returned by `Environment::assign` when assignment fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Variable not found in any scope.
    Undefined,
}

/// Error returned when a declaration conflicts with an existing binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclareError {
    /// The name is already bound in a way the declaration may not replace.
    Redeclaration,
}

/// A single-threaded scope wrapper for reference-counted interior mutability.
///
/// This type wraps `Rc<RefCell<T>>` and enforces that all scope allocations
/// go through the `LocalScope::new()` factory method.
///
/// `LocalScope<T>` is NOT thread-safe. The interpreter runs single-threaded
/// and owns its heap exclusively.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    /// Create a new `LocalScope` wrapping the given value.
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Borrow the inner value immutably.
    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the inner value mutably.
    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single scope containing variable bindings.
#[derive(Clone, Debug)]
pub struct Scope {
    /// Variable bindings in this scope.
    bindings: FxHashMap<Name, Binding>,
    /// Parent scope (for lexical scoping).
    parent: Option<LocalScope<Scope>>,
    kind: ScopeKind,
}

/// A variable binding.
#[derive(Clone, Copy, Debug)]
struct Binding {
    value: Value,
    kind: DeclarationKind,
}

impl Scope {
    /// Create a new empty global scope.
    pub fn global() -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: None,
            kind: ScopeKind::Global,
        }
    }

    /// Create a new scope with a parent.
    pub fn with_parent(parent: LocalScope<Scope>, kind: ScopeKind) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
            kind,
        }
    }

    #[inline]
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Bind `name` in this scope, replacing any existing binding.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value, kind: DeclarationKind) {
        self.bindings.insert(name, Binding { value, kind });
    }

    /// Declaration kind of `name` in this scope only.
    #[inline]
    fn declared_kind(&self, name: Name) -> Option<DeclarationKind> {
        self.bindings.get(&name).map(|b| b.kind)
    }

    /// Look up a variable by name, walking the parent chain.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(binding) = self.bindings.get(&name) {
            return Some(binding.value);
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }

    /// Assign to the nearest binding of `name`.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        if let Some(binding) = self.bindings.get_mut(&name) {
            binding.value = value;
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().assign(name, value);
        }
        Err(AssignError::Undefined)
    }
}

impl Trace for Scope {
    fn trace(&self, tracer: &mut dyn Tracer) {
        for binding in self.bindings.values() {
            binding.value.trace(tracer);
        }
    }
}

/// Environment for the interpreter using a scope stack.
///
/// The stack always holds the full chain from the global scope to the
/// current scope, so walking it innermost-first visits exactly the scopes
/// the parent links would.
pub struct Environment {
    /// Stack of scopes, with current scope at the top.
    scopes: Vec<LocalScope<Scope>>,
    /// Global scope (always at the bottom).
    global: LocalScope<Scope>,
}

impl Environment {
    /// Create a new environment holding only a global scope.
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::global());
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    /// Get the current scope depth.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Kind of the innermost scope.
    pub fn current_kind(&self) -> ScopeKind {
        self.current().borrow().kind()
    }

    /// Push a new scope onto the stack.
    #[inline]
    pub fn push_scope(&mut self, kind: ScopeKind) {
        let parent = self.current().clone();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent, kind)));
    }

    /// Pop the current scope from the stack. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    fn current(&self) -> &LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global)
    }

    /// Bind `name` in the current scope unconditionally.
    ///
    /// Used for parameters, which are bound into a fresh function scope.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value, kind: DeclarationKind) {
        self.current().borrow_mut().define(name, value, kind);
    }

    /// Declare `name` as `undefined` with the given declaration kind.
    ///
    /// `Let` binds in the current scope; `Var` hoists to the nearest function
    /// or global scope. See the module docs for the re-declaration rules.
    pub fn declare(&mut self, name: Name, kind: DeclarationKind) -> Result<(), DeclareError> {
        match kind {
            DeclarationKind::Let => {
                let mut scope = self.current().borrow_mut();
                if scope.declared_kind(name).is_some() {
                    return Err(DeclareError::Redeclaration);
                }
                scope.define(name, Value::Undefined, DeclarationKind::Let);
                Ok(())
            }
            DeclarationKind::Var => {
                for scope in self.scopes.iter().rev() {
                    let mut scope = scope.borrow_mut();
                    let existing = scope.declared_kind(name);
                    if existing == Some(DeclarationKind::Let) {
                        return Err(DeclareError::Redeclaration);
                    }
                    if scope.kind().is_hoisting_target() {
                        if existing.is_none() {
                            scope.define(name, Value::Undefined, DeclarationKind::Var);
                        }
                        return Ok(());
                    }
                }
                // The bottom of the stack is always the global scope.
                self.global
                    .borrow_mut()
                    .define(name, Value::Undefined, DeclarationKind::Var);
                Ok(())
            }
        }
    }

    /// Bind a function declaration in the current scope.
    pub fn define_function(&mut self, name: Name, function: Value) -> Result<(), DeclareError> {
        let mut scope = self.current().borrow_mut();
        if scope.declared_kind(name) == Some(DeclarationKind::Let) {
            return Err(DeclareError::Redeclaration);
        }
        scope.define(name, function, DeclarationKind::Var);
        Ok(())
    }

    /// Look up a variable by name.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.current().borrow().lookup(name)
    }

    /// Assign to the nearest existing binding.
    #[inline]
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        self.current().borrow_mut().assign(name, value)
    }

    /// Look up a variable in the global scope only.
    pub fn lookup_global(&self, name: Name) -> Option<Value> {
        self.global.borrow().bindings.get(&name).map(|b| b.value)
    }

    /// Create a child environment for function calls.
    ///
    /// The child shares the global scope and starts with one fresh
    /// `Function` scope whose parent is the global scope, so callee bodies
    /// see globals but never the caller's locals.
    #[must_use]
    pub fn child(&self) -> Self {
        let global = self.global.clone();
        let function = LocalScope::new(Scope::with_parent(global.clone(), ScopeKind::Function));
        Environment {
            scopes: vec![global.clone(), function],
            global,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Trace for Environment {
    fn trace(&self, tracer: &mut dyn Tracer) {
        for scope in &self.scopes {
            scope.borrow().trace(tracer);
        }
    }
}

#[cfg(test)]
mod tests;

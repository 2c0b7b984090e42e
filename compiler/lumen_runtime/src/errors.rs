//! Error types for evaluation.
//!
//! Every fallible evaluation step returns `Result<_, EvalError>`; nothing in
//! the runtime aborts the process on a user-program error.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries the structured data for each condition and
//! [`EvalErrorKind::category`] folds it onto the coarse taxonomy reported to
//! embedders. Factory functions (e.g. `unresolved_reference()`) are the public
//! API; they populate both `kind` and `message`.

use std::fmt;

use crate::value::Value;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Coarse error taxonomy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// An identifier has no binding anywhere in the scope chain.
    UnresolvedReference,
    /// A call supplied a different number of arguments than declared.
    ArityMismatch,
    /// A value or node had the wrong shape for the operation.
    TypeMismatch,
    /// An evaluation limit was hit.
    Resource,
    /// A runtime invariant broke. Indicates a defect in the embedder or runtime.
    Internal,
}

/// Typed error kind for structured diagnostics.
///
/// The `Display` impl produces the same message stored in `EvalError::message`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Access
    UnresolvedReference {
        name: String,
    },
    Redeclaration {
        name: String,
    },

    // Function
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    NotCallable {
        name: String,
        type_name: &'static str,
    },
    StackOverflow {
        depth: usize,
    },

    // Shape
    InvalidAssignmentTarget {
        found: &'static str,
    },
    ComputedMemberAccess {
        found: &'static str,
    },

    // Heap
    StaleReference,
}

impl EvalErrorKind {
    /// Map onto the coarse taxonomy.
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UnresolvedReference { .. } => ErrorCategory::UnresolvedReference,
            Self::ArityMismatch { .. } => ErrorCategory::ArityMismatch,
            Self::NotCallable { .. }
            | Self::InvalidAssignmentTarget { .. }
            | Self::ComputedMemberAccess { .. }
            | Self::Redeclaration { .. } => ErrorCategory::TypeMismatch,
            Self::StackOverflow { .. } => ErrorCategory::Resource,
            Self::StaleReference => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Access
            Self::UnresolvedReference { name } => write!(f, "'{name}' is not defined"),
            Self::Redeclaration { name } => {
                write!(f, "identifier '{name}' has already been declared")
            }

            // Function
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::NotCallable { name, type_name } => {
                write!(f, "'{name}' is not a function (it is {type_name})")
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth exceeded (limit: {depth})")
            }

            // Shape
            Self::InvalidAssignmentTarget { found } => {
                write!(f, "invalid assignment target: {found}")
            }
            Self::ComputedMemberAccess { found } => {
                write!(f, "computed member access is not supported (property is {found})")
            }

            // Heap
            Self::StaleReference => write!(f, "heap reference used after its cell was collected"),
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Called function's name.
    pub name: String,
}

/// Snapshot of the call stack at an error site, most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {}", frame.name)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error kind.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Call stack at the error site.
    ///
    /// Attached by the evaluator when the error leaves a function call. The
    /// innermost call's capture wins.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            backtrace: None,
        }
    }

    /// Coarse category of this error.
    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Attach a backtrace unless one is already present.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() {
            self.backtrace = Some(backtrace);
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Access Errors

/// Identifier not bound in any reachable scope.
#[cold]
pub fn unresolved_reference(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnresolvedReference {
        name: name.to_string(),
    })
}

/// Declaration conflicts with an existing binding.
#[cold]
pub fn redeclaration(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Redeclaration {
        name: name.to_string(),
    })
}

// Function Errors

/// Wrong number of call arguments.
#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Callee resolved to a value that is not a function.
#[cold]
pub fn not_callable(name: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        name: name.to_string(),
        type_name,
    })
}

/// Call depth limit exceeded.
#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

// Shape Errors

/// Assignment to something other than a plain identifier.
#[cold]
pub fn invalid_assignment_target(found: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAssignmentTarget { found })
}

/// Member property that is not a plain identifier.
#[cold]
pub fn computed_member_access(found: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ComputedMemberAccess { found })
}

// Heap Errors

/// Handle no longer resolves to a live cell.
#[cold]
pub fn stale_reference() -> EvalError {
    EvalError::from_kind(EvalErrorKind::StaleReference)
}

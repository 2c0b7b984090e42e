//! Call frame tracking for the evaluator.
//!
//! `CallStack` enforces the call depth limit and captures backtraces at
//! error sites. The backtrace is stored on `EvalError` as `EvalBacktrace`
//! (defined in `lumen_runtime`).

use lumen_ir::{Name, StringInterner};
use lumen_runtime::{BacktraceFrame, EvalBacktrace, EvalError};

/// A single frame in the live call stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Interned name of the called function.
    pub name: Name,
}

/// Live call stack for the interpreter.
///
/// Each function call pushes a frame; return pops it. The depth check is
/// integrated into `push()`.
///
/// ```ignore
/// let mut stack = CallStack::new(Some(1024));
/// stack.push(CallFrame { name })?;
/// // ... evaluate function body ...
/// stack.pop();
/// ```
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// Create a new empty call stack with the given depth limit.
    ///
    /// `None` means unlimited; native stack growth is still bounded by
    /// available memory.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// Returns a `StackOverflow` error if the limit would be exceeded. The
    /// frame is NOT pushed on overflow.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(lumen_runtime::stack_overflow(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the most recent call frame.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the stack is empty.
    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Snapshot of the live frames, most recent call first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: interner.lookup(f.name).to_string(),
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace from this call stack to an error.
    ///
    /// Errors raised outside any call are returned unchanged.
    pub fn attach_backtrace(&self, err: EvalError, interner: &StringInterner) -> EvalError {
        if self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture(interner))
    }
}

impl Default for CallStack {
    /// Unlimited depth.
    fn default() -> Self {
        Self::new(None)
    }
}

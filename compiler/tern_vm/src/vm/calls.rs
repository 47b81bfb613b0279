//! CALL, RETURN and CLOSURE.
//!
//! Calling convention: the callee sits at `sp - 1 - argc` with its
//! arguments above it. A closure frame's base pointer is the first
//! argument's slot, so parameters are locals `0..argc`. Returning drops the
//! frame's locals and the callee, then pushes the result.

use tern_value::{Closure, Heap, Value};

use super::{Flow, Result, Vm};
use crate::frame::Frame;
use crate::RuntimeErrorKind;

impl Vm<'_> {
    pub(super) fn call(&mut self, argc: usize) -> Result {
        match self.stack.peek(argc)? {
            Value::Closure(closure) => {
                let closure = closure.clone();
                self.call_closure(closure, argc)
            }
            Value::Builtin(index) => {
                let index = *index;
                self.call_builtin(index, argc)
            }
            other => Err(RuntimeErrorKind::NotCallable(other.kind())),
        }
    }

    fn call_closure(&mut self, closure: Heap<Closure>, argc: usize) -> Result {
        let wanted = usize::from(closure.function.num_params);
        if argc != wanted {
            return Err(RuntimeErrorKind::WrongArity { got: argc, wanted });
        }
        if self.frames.len() >= self.frame_capacity {
            return Err(RuntimeErrorKind::FrameOverflow {
                capacity: self.frame_capacity,
            });
        }

        let base_pointer = self.stack.sp() - argc;
        let num_locals = usize::from(closure.function.num_locals).max(argc);
        // Slots past the arguments may hold values from an earlier call.
        self.stack
            .reserve_to(base_pointer + argc, base_pointer + num_locals)?;

        tracing::trace!(
            function = closure.function.name.as_deref().unwrap_or("<anonymous>"),
            argc,
            depth = self.frames.len(),
            "call"
        );
        self.frames.push(Frame::new(closure, base_pointer));
        Ok(())
    }

    fn call_builtin(&mut self, index: u32, argc: usize) -> Result {
        let native = self
            .builtins
            .resolve(index)
            .ok_or(RuntimeErrorKind::UnknownBuiltin(index))?;
        tracing::trace!(
            builtin = self.builtins.name_of(index).unwrap_or("?"),
            argc,
            "call builtin"
        );
        let result = native(self.stack.window(argc)?).map_err(RuntimeErrorKind::Builtin)?;
        self.stack.discard(argc + 1)?;
        self.stack.push(result)
    }

    /// Pop the current frame and hand the returned value to its caller;
    /// `None` means the body ran off its end and returns `null`.
    ///
    /// Returning from the entry frame ends the run. An explicit value
    /// becomes the last popped value; otherwise the final expression
    /// statement's value, if one is left on the stack, is popped.
    pub(super) fn return_from_call(&mut self, value: Option<Value>) -> Result<Flow> {
        let frame = self.frames.pop().ok_or(RuntimeErrorKind::StackUnderflow)?;

        if self.frames.is_empty() {
            match value {
                Some(value) => {
                    self.stack.truncate(0);
                    self.stack.push(value)?;
                    self.stack.pop()?;
                }
                None if !self.stack.is_empty() => {
                    self.stack.pop()?;
                }
                None => {}
            }
            return Ok(Flow::Halt);
        }

        self.stack.truncate(frame.base_pointer.saturating_sub(1));
        self.stack.push(value.unwrap_or(Value::Null))?;
        Ok(Flow::Continue)
    }

    pub(super) fn make_closure(&mut self, constant: usize, num_free: usize) -> Result {
        let function = match self.constants.get(constant) {
            Some(Value::Function(function)) => function.clone(),
            Some(_) => return Err(RuntimeErrorKind::NotAFunction { index: constant }),
            None => return Err(RuntimeErrorKind::MissingConstant { index: constant }),
        };
        let free = self.stack.window(num_free)?.to_vec();
        self.stack.discard(num_free)?;
        self.stack.push(Value::closure(function, free))
    }
}

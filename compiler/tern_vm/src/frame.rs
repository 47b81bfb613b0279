//! Call frames.

use tern_bytecode::Instructions;
use tern_ir::Span;
use tern_value::{Closure, Heap};

/// One active call.
#[derive(Clone, Debug)]
pub struct Frame {
    pub closure: Heap<Closure>,
    /// Offset of the next instruction to fetch.
    pub ip: usize,
    /// Stack slot of local 0. The callee itself sits just below it.
    pub base_pointer: usize,
}

impl Frame {
    pub fn new(closure: Heap<Closure>, base_pointer: usize) -> Self {
        Frame {
            closure,
            ip: 0,
            base_pointer,
        }
    }

    #[inline]
    pub fn instructions(&self) -> &Instructions {
        &self.closure.function.instructions
    }

    pub fn num_locals(&self) -> usize {
        usize::from(self.closure.function.num_locals)
    }

    pub fn span_at(&self, offset: usize) -> Option<Span> {
        self.closure.function.lines.span_at(offset)
    }
}

//! Per-function instruction buffer.

use tern_bytecode::{make, Instructions, LineTable, OpCode};
use tern_ir::Span;

use crate::CompileErrorKind;

/// Operand written into jumps until their target is known.
pub const PLACEHOLDER: usize = 0xFFFF;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct EmittedInstruction {
    pub op: OpCode,
    pub position: usize,
}

/// Forward jumps of one loop, patched when the loop closes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LoopJumps {
    pub breaks: Vec<usize>,
    pub continues: Vec<usize>,
    /// Pending operands when the loop was entered.
    pub operands: usize,
}

/// Instruction buffer for one function body (or the top-level program).
#[derive(Clone, Debug, Default)]
pub struct CompilationUnit {
    instructions: Instructions,
    lines: LineTable,
    last: Option<EmittedInstruction>,
    previous: Option<EmittedInstruction>,
    loops: Vec<LoopJumps>,
    /// Values pushed by enclosing expressions that are still being compiled.
    operands: usize,
}

impl CompilationUnit {
    pub fn new() -> Self {
        CompilationUnit::default()
    }

    /// Offset the next instruction will be written at.
    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Append one instruction and return its position.
    pub fn emit(
        &mut self,
        op: OpCode,
        operands: &[usize],
        span: Span,
    ) -> Result<usize, CompileErrorKind> {
        let bytes = make(op, operands)?;
        let position = self.instructions.len();
        self.instructions.extend_from_slice(&bytes);
        self.lines.push(position, span);
        self.previous = self.last.replace(EmittedInstruction { op, position });
        Ok(position)
    }

    pub fn last_is(&self, op: OpCode) -> bool {
        self.last.is_some_and(|last| last.op == op)
    }

    /// Drop the most recent instruction.
    pub fn remove_last(&mut self) {
        if let Some(last) = self.last.take() {
            self.instructions.truncate(last.position);
            self.lines.truncate(last.position);
            self.last = self.previous.take();
        }
    }

    /// Turn a trailing `POP` into `RETURN_VALUE`; both are one byte wide.
    pub fn replace_last_pop_with_return(&mut self) -> bool {
        match self.last {
            Some(last) if last.op == OpCode::Pop => {
                self.instructions[last.position] = OpCode::ReturnValue.as_byte();
                self.last = Some(EmittedInstruction {
                    op: OpCode::ReturnValue,
                    position: last.position,
                });
                true
            }
            _ => false,
        }
    }

    /// Point the jump at `position` to `target`.
    pub fn patch_jump(&mut self, position: usize, target: usize) -> Result<(), CompileErrorKind> {
        let target =
            u16::try_from(target).map_err(|_| CompileErrorKind::JumpOutOfRange { target })?;
        let operand = position + 1;
        if operand + 2 > self.instructions.len() {
            return Err(CompileErrorKind::Internal(format!(
                "no jump operand at offset {position}"
            )));
        }
        self.instructions[operand..operand + 2].copy_from_slice(&target.to_be_bytes());
        Ok(())
    }

    // Loops

    pub fn enter_loop(&mut self) {
        self.loops.push(LoopJumps {
            operands: self.operands,
            ..LoopJumps::default()
        });
    }

    pub fn leave_loop(&mut self) -> LoopJumps {
        self.loops.pop().unwrap_or_default()
    }

    // Operand tracking

    pub fn hold(&mut self, count: usize) {
        self.operands += count;
    }

    pub fn release(&mut self, count: usize) {
        self.operands = self.operands.saturating_sub(count);
    }

    /// Values a `break` or `continue` must pop to leave the stack as the
    /// innermost loop found it; `None` outside a loop.
    pub fn loop_exit_pops(&self) -> Option<usize> {
        self.loops
            .last()
            .map(|jumps| self.operands.saturating_sub(jumps.operands))
    }

    /// Record a pending `break` jump; `false` outside a loop.
    pub fn add_break(&mut self, position: usize) -> bool {
        match self.loops.last_mut() {
            Some(jumps) => {
                jumps.breaks.push(position);
                true
            }
            None => false,
        }
    }

    /// Record a pending `continue` jump; `false` outside a loop.
    pub fn add_continue(&mut self, position: usize) -> bool {
        match self.loops.last_mut() {
            Some(jumps) => {
                jumps.continues.push(position);
                true
            }
            None => false,
        }
    }

    pub fn instructions(&self) -> &Instructions {
        &self.instructions
    }

    pub fn finish(self) -> (Instructions, LineTable) {
        (self.instructions, self.lines)
    }
}

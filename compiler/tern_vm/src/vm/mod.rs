//! Fetch-decode-dispatch loop.
//!
//! The VM starts with one frame wrapping the entry instructions as a
//! zero-argument closure and runs until that frame is gone or an
//! instruction fails. Handlers return [`RuntimeErrorKind`]; the loop
//! attaches the span of the failing instruction from the running
//! function's line table.

mod calls;
mod collections;
mod ops;
mod variables;

use tern_bytecode::{decode_at, DecodeError, OpCode, Operands};
use tern_compiler::ByteCode;
use tern_value::{BuiltinRegistry, CompiledFunction, Value};

use crate::config::VmConfig;
use crate::frame::Frame;
use crate::stack::Stack;
use crate::{RuntimeError, RuntimeErrorKind, VmBuilder};

type Result<T = ()> = std::result::Result<T, RuntimeErrorKind>;

/// What the loop does after an instruction.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Flow {
    Continue,
    Halt,
}

pub struct Vm<'b> {
    constants: Vec<Value>,
    stack: Stack,
    frames: Vec<Frame>,
    frame_capacity: usize,
    globals: Vec<Value>,
    builtins: &'b dyn BuiltinRegistry,
    budget: Option<u64>,
    executed: u64,
}

impl<'b> Vm<'b> {
    /// A VM with default limits.
    pub fn new(bytecode: ByteCode, builtins: &'b dyn BuiltinRegistry) -> Self {
        let config = VmConfig::default();
        let globals = vec![Value::Null; config.globals_capacity];
        Vm::from_parts(bytecode, builtins, config, globals)
    }

    pub fn builder(bytecode: ByteCode, builtins: &'b dyn BuiltinRegistry) -> VmBuilder<'b> {
        VmBuilder::new(bytecode, builtins)
    }

    /// `config` must already be validated.
    pub(crate) fn from_parts(
        bytecode: ByteCode,
        builtins: &'b dyn BuiltinRegistry,
        config: VmConfig,
        globals: Vec<Value>,
    ) -> Self {
        let main = Value::main_closure(CompiledFunction {
            instructions: bytecode.instructions,
            num_locals: 0,
            num_params: 0,
            name: Some("main".to_string()),
            lines: bytecode.lines,
        });
        let mut frames = Vec::with_capacity(config.frame_capacity.min(64));
        frames.push(Frame::new(main, 0));

        Vm {
            constants: bytecode.constants,
            stack: Stack::with_capacity(config.stack_capacity),
            frames,
            frame_capacity: config.frame_capacity,
            globals,
            builtins,
            budget: config.instruction_budget,
            executed: 0,
        }
    }

    /// Execute until the entry frame returns or an instruction fails.
    pub fn run(&mut self) -> std::result::Result<(), RuntimeError> {
        tracing::debug!(
            bytes = self.frames.first().map_or(0, |frame| frame.instructions().len()),
            constants = self.constants.len(),
            "vm start"
        );

        while let Some(depth) = self.frames.len().checked_sub(1) {
            let ip = self.frames[depth].ip;
            match self.step(depth, ip) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Halt) => break,
                Err(kind) => {
                    let span = self.frames.get(depth).and_then(|frame| frame.span_at(ip));
                    tracing::debug!(error = %kind, ip, depth, "vm error");
                    return Err(kind.at(span));
                }
            }
        }

        tracing::debug!(
            executed = self.executed,
            result = %self.stack.last_popped(),
            "vm finished"
        );
        Ok(())
    }

    /// Fetch, decode and execute the instruction at `ip` of frame `depth`.
    fn step(&mut self, depth: usize, ip: usize) -> Result<Flow> {
        let frame = &self.frames[depth];
        if ip >= frame.instructions().len() {
            return self.return_from_call(None);
        }
        if let Some(budget) = self.budget {
            if self.executed >= budget {
                return Err(RuntimeErrorKind::BudgetExhausted { budget });
            }
        }
        self.executed += 1;

        let (op, operands, next) = decode_at(frame.instructions(), ip).map_err(|err| match err {
            DecodeError::UnknownOpcode { byte, offset } => {
                RuntimeErrorKind::UnknownOpcode { byte, offset }
            }
            DecodeError::Truncated { offset } => RuntimeErrorKind::TruncatedInstruction { offset },
        })?;
        self.frames[depth].ip = next;
        self.execute(op, &operands)
    }

    fn execute(&mut self, op: OpCode, operands: &Operands) -> Result<Flow> {
        let raw = |i: usize| operands.get(i).copied().unwrap_or_default();
        let operand = |i: usize| usize::from(raw(i));

        match op {
            OpCode::Constant => {
                let index = operand(0);
                let value = self
                    .constants
                    .get(index)
                    .cloned()
                    .ok_or(RuntimeErrorKind::MissingConstant { index })?;
                self.stack.push(value)?;
            }
            OpCode::True => self.stack.push(Value::Bool(true))?,
            OpCode::False => self.stack.push(Value::Bool(false))?,
            OpCode::Null => self.stack.push(Value::Null)?,
            OpCode::Pop => {
                self.stack.pop()?;
            }

            OpCode::Add
            | OpCode::Sub
            | OpCode::Mul
            | OpCode::Div
            | OpCode::Mod
            | OpCode::BitAnd
            | OpCode::BitOr
            | OpCode::BitXor
            | OpCode::Shl
            | OpCode::Shr
            | OpCode::Equal
            | OpCode::NotEqual
            | OpCode::Greater
            | OpCode::GreaterEqual
            | OpCode::Less
            | OpCode::LessEqual
            | OpCode::And
            | OpCode::Or => {
                let right = self.stack.pop()?;
                let left = self.stack.pop()?;
                self.stack.push(ops::binary(op, left, right)?)?;
            }
            OpCode::Negate | OpCode::Not | OpCode::BitNot => {
                let value = self.stack.pop()?;
                self.stack.push(ops::unary(op, &value)?)?;
            }

            OpCode::Jump => self.jump(operand(0)),
            OpCode::JumpIfFalse => {
                if !self.stack.pop()?.is_truthy() {
                    self.jump(operand(0));
                }
            }

            OpCode::Array => self.build_array(operand(0))?,
            OpCode::Hash => self.build_hash(operand(0))?,
            OpCode::Index => {
                let index = self.stack.pop()?;
                let target = self.stack.pop()?;
                self.stack.push(collections::index(&target, &index)?)?;
            }

            OpCode::Get => {
                let value = self.load(raw(0))?;
                self.stack.push(value)?;
            }
            OpCode::Set => {
                let value = self.stack.pop()?.deep_copy();
                self.store(raw(0), value)?;
            }
            OpCode::SetAssign => self.set_assign(raw(0))?,

            OpCode::Call => self.call(operand(0))?,
            OpCode::Return => return self.return_from_call(Some(Value::Null)),
            OpCode::ReturnValue => {
                let value = self.stack.pop()?;
                return self.return_from_call(Some(value));
            }
            OpCode::Closure => self.make_closure(operand(0), operand(1))?,
            OpCode::CurrentClosure => {
                let closure = self.current_frame()?.closure.clone();
                self.stack.push(Value::Closure(closure))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn jump(&mut self, target: usize) {
        if let Some(frame) = self.frames.last_mut() {
            frame.ip = target;
        }
    }

    fn current_frame(&self) -> Result<&Frame> {
        self.frames.last().ok_or(RuntimeErrorKind::StackUnderflow)
    }
}

// Host inspection

impl Vm<'_> {
    /// Value on top of the operand stack.
    pub fn top(&self) -> Option<&Value> {
        self.stack.top()
    }

    /// The most recently popped value; after a completed run, the value of
    /// the program's final expression.
    pub fn last_popped(&self) -> &Value {
        self.stack.last_popped()
    }

    pub fn global(&self, index: usize) -> Option<&Value> {
        self.globals.get(index)
    }

    /// Active frames; zero once the program has completed.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Local slots of frame `index`, counted from the entry frame.
    pub fn frame_locals(&self, index: usize) -> Option<&[Value]> {
        let frame = self.frames.get(index)?;
        let live = self.stack.as_slice();
        let start = frame.base_pointer.min(live.len());
        let end = (frame.base_pointer + frame.num_locals()).min(live.len());
        Some(&live[start..end])
    }

    /// Instructions executed so far.
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// Give up the global slots, to seed the next REPL entry.
    pub fn into_globals(self) -> Vec<Value> {
        self.globals
    }
}

//! Runtime errors.

use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_ir::Span;
use tern_value::ValueKind;
use thiserror::Error;

/// A runtime error with the span of the instruction that raised it.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    /// `None` when the failing instruction has no line table entry.
    pub span: Option<Span>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    #[error("unsupported operand types for {op}: {left} and {right}")]
    UnsupportedOperands {
        op: &'static str,
        left: ValueKind,
        right: ValueKind,
    },
    #[error("unsupported operand type for {op}: {operand}")]
    UnsupportedOperand { op: &'static str, operand: ValueKind },
    #[error("wrong number of arguments. got={got}, wanted={wanted}")]
    WrongArity { got: usize, wanted: usize },
    #[error("index operator not supported: {target}[{index}]")]
    UnsupportedIndex { target: ValueKind, index: ValueKind },
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },
    #[error("stack overflow: more than {capacity} values")]
    StackOverflow { capacity: usize },
    #[error("frame overflow: more than {capacity} nested calls")]
    FrameOverflow { capacity: usize },
    #[error("stack underflow")]
    StackUnderflow,
    #[error("unknown opcode {byte:#04x} at offset {offset}")]
    UnknownOpcode { byte: u8, offset: usize },
    #[error("truncated instruction at offset {offset}")]
    TruncatedInstruction { offset: usize },
    #[error("calling non-function: {0}")]
    NotCallable(ValueKind),
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {op}")]
    IntegerOverflow { op: &'static str },
    #[error("unusable as hash key: {0}")]
    UnhashableKey(ValueKind),
    /// Message reported by a builtin, verbatim.
    #[error("{0}")]
    Builtin(String),
    #[error("instruction budget of {budget} exhausted")]
    BudgetExhausted { budget: u64 },
    #[error("global slot {index} exceeds capacity {capacity}")]
    GlobalOutOfRange { index: usize, capacity: usize },
    #[error("constant {index} does not exist")]
    MissingConstant { index: usize },
    #[error("constant {index} is not a function")]
    NotAFunction { index: usize },
    #[error("no builtin with index {0}")]
    UnknownBuiltin(u32),
    #[error("free variable {index} is not captured by the running closure")]
    MissingFreeVariable { index: usize },
    #[error("cannot assign through {0}")]
    InvalidStoreTarget(&'static str),
}

impl RuntimeErrorKind {
    pub fn at(self, span: Option<Span>) -> RuntimeError {
        RuntimeError { kind: self, span }
    }
}

impl RuntimeError {
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            RuntimeErrorKind::UnsupportedOperands { .. }
            | RuntimeErrorKind::UnsupportedOperand { .. } => ErrorCode::E6001,
            RuntimeErrorKind::WrongArity { .. } => ErrorCode::E6002,
            RuntimeErrorKind::UnsupportedIndex { .. }
            | RuntimeErrorKind::IndexOutOfBounds { .. } => ErrorCode::E6003,
            RuntimeErrorKind::StackOverflow { .. } => ErrorCode::E6004,
            RuntimeErrorKind::FrameOverflow { .. } => ErrorCode::E6005,
            RuntimeErrorKind::StackUnderflow => ErrorCode::E6006,
            RuntimeErrorKind::UnknownOpcode { .. }
            | RuntimeErrorKind::TruncatedInstruction { .. } => ErrorCode::E6007,
            RuntimeErrorKind::NotCallable(_) => ErrorCode::E6008,
            RuntimeErrorKind::DivisionByZero => ErrorCode::E6009,
            RuntimeErrorKind::IntegerOverflow { .. } => ErrorCode::E6010,
            RuntimeErrorKind::UnhashableKey(_) => ErrorCode::E6011,
            RuntimeErrorKind::Builtin(_) => ErrorCode::E6012,
            RuntimeErrorKind::BudgetExhausted { .. } => ErrorCode::E6013,
            RuntimeErrorKind::GlobalOutOfRange { .. }
            | RuntimeErrorKind::MissingConstant { .. }
            | RuntimeErrorKind::NotAFunction { .. }
            | RuntimeErrorKind::UnknownBuiltin(_)
            | RuntimeErrorKind::MissingFreeVariable { .. }
            | RuntimeErrorKind::InvalidStoreTarget(_) => ErrorCode::E6099,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        let Some(span) = self.span else {
            return diag;
        };
        match &self.kind {
            RuntimeErrorKind::FrameOverflow { .. } => diag
                .with_label(span, "call made here")
                .with_note("the recursion may not terminate"),
            RuntimeErrorKind::BudgetExhausted { .. } => diag.with_label(span, "stopped here"),
            _ => diag.with_label(span, "raised here"),
        }
    }
}

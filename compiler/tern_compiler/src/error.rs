//! Compile error types.

use tern_bytecode::{EncodeError, OpCode};
use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_ir::Span;
use thiserror::Error;

use crate::SymbolError;

/// A compile error with the span of the node being compiled.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("{kind}")]
pub struct CompileError {
    pub kind: CompileErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CompileErrorKind {
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
    #[error(transparent)]
    Symbol(#[from] SymbolError),
    #[error("cannot assign to {target}")]
    InvalidAssignment { target: String },
    #[error("`break` outside of a loop")]
    BreakOutsideLoop,
    #[error("`continue` outside of a loop")]
    ContinueOutsideLoop,
    #[error("too many constants: the pool holds at most 65536")]
    ConstantPoolOverflow,
    #[error("jump target {target} is out of range")]
    JumpOutOfRange { target: usize },
    #[error("operand {value} of {op} does not fit in 16 bits")]
    TooManyOperands { op: OpCode, value: usize },
    #[error("internal compiler error: {0}")]
    Internal(String),
}

impl From<EncodeError> for CompileErrorKind {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::OperandOverflow { op, value } => {
                CompileErrorKind::TooManyOperands { op, value }
            }
            EncodeError::OperandCount { .. } => CompileErrorKind::Internal(err.to_string()),
        }
    }
}

impl CompileErrorKind {
    pub fn at(self, span: Span) -> CompileError {
        CompileError { kind: self, span }
    }
}

impl CompileError {
    pub fn new(kind: CompileErrorKind, span: Span) -> Self {
        CompileError { kind, span }
    }

    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            CompileErrorKind::UnknownOperator(_) => ErrorCode::E3001,
            CompileErrorKind::Symbol(SymbolError::Unresolved(_)) => ErrorCode::E3002,
            CompileErrorKind::Symbol(SymbolError::IndexOverflow { .. }) => ErrorCode::E3003,
            CompileErrorKind::InvalidAssignment { .. } => ErrorCode::E3004,
            CompileErrorKind::BreakOutsideLoop => ErrorCode::E3005,
            CompileErrorKind::ContinueOutsideLoop => ErrorCode::E3006,
            CompileErrorKind::ConstantPoolOverflow => ErrorCode::E3007,
            CompileErrorKind::JumpOutOfRange { .. } => ErrorCode::E3008,
            CompileErrorKind::TooManyOperands { .. } => ErrorCode::E3009,
            CompileErrorKind::Internal(_) => ErrorCode::E9001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match &self.kind {
            CompileErrorKind::Symbol(SymbolError::Unresolved(name)) => {
                diag.with_label(self.span, format!("`{name}` is not defined"))
            }
            CompileErrorKind::InvalidAssignment { .. } => diag
                .with_label(self.span, "not assignable")
                .with_note("only variables and indexed variables can be assigned"),
            CompileErrorKind::BreakOutsideLoop | CompileErrorKind::ContinueOutsideLoop => {
                diag.with_label(self.span, "not inside `while` or `for`")
            }
            _ => diag.with_label(self.span, "here"),
        }
    }
}

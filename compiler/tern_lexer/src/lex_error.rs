//! Lexer errors and their diagnostic rendering.

use std::fmt;

use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Character sequence that starts no token.
    InvalidToken(String),
    /// String literal without a closing `"` on the same line.
    UnterminatedString,
    /// Integer literal that does not fit in `i64`.
    IntOverflow(String),
}

impl LexError {
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::InvalidToken(_) => ErrorCode::E0001,
            LexErrorKind::UnterminatedString => ErrorCode::E0002,
            LexErrorKind::IntOverflow(_) => ErrorCode::E0003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.kind {
            LexErrorKind::InvalidToken(_) => "not a valid token",
            LexErrorKind::UnterminatedString => "string starts here",
            LexErrorKind::IntOverflow(_) => "exceeds 9223372036854775807",
        };
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(self.span, label)
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::InvalidToken(text) => write!(f, "invalid token `{text}`"),
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::IntOverflow(text) => {
                write!(f, "integer literal `{text}` is too large")
            }
        }
    }
}

impl std::error::Error for LexError {}

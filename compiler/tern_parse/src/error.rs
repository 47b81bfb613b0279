//! Parse error types.

use std::fmt;

use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_ir::Span;

/// A parse error with the span of the offending token.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParseErrorKind {
    /// A specific token was required.
    UnexpectedToken { expected: String, found: String },
    /// An expression was required.
    ExpectedExpression { found: String },
    /// End of input reached with a delimiter still open.
    UnclosedDelimiter { delimiter: char, opened_at: Span },
    /// A binding or parameter name was required.
    ExpectedIdentifier { found: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ParseErrorKind::UnexpectedToken { .. } => ErrorCode::E1001,
            ParseErrorKind::ExpectedExpression { .. } => ErrorCode::E1002,
            ParseErrorKind::UnclosedDelimiter { .. } => ErrorCode::E1003,
            ParseErrorKind::ExpectedIdentifier { .. } => ErrorCode::E1004,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match &self.kind {
            ParseErrorKind::UnclosedDelimiter {
                delimiter,
                opened_at,
            } => diag
                .with_label(*opened_at, format!("unclosed `{delimiter}`"))
                .with_secondary_label(self.span, "input ends here"),
            ParseErrorKind::UnexpectedToken { expected, .. } => {
                diag.with_label(self.span, format!("expected {expected}"))
            }
            ParseErrorKind::ExpectedExpression { .. } => {
                diag.with_label(self.span, "expected an expression")
            }
            ParseErrorKind::ExpectedIdentifier { .. } => {
                diag.with_label(self.span, "expected a name")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ParseErrorKind::ExpectedExpression { found } => {
                write!(f, "expected expression, found {found}")
            }
            ParseErrorKind::UnclosedDelimiter { delimiter, .. } => {
                write!(f, "unclosed delimiter `{delimiter}`")
            }
            ParseErrorKind::ExpectedIdentifier { found } => {
                write!(f, "expected identifier, found {found}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

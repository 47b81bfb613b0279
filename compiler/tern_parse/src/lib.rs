//! Recursive descent parser for Tern.
//!
//! Statements are parsed by recursive descent, expressions by a Pratt loop
//! driven by [`BinaryOp::binding_power`]. On error the parser records a
//! [`ParseError`], skips to the next statement boundary and carries on, so
//! one run reports every independent syntax error.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

use tern_ir::{BinaryOp, Program, Span};
use tern_lexer::{Token, TokenKind};

/// Result of parsing a token stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            errors: Vec::new(),
        }
    }

    #[inline]
    fn current_kind(&self) -> &'a TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> &'a Token {
        self.cursor.advance()
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }

    /// Consume `kind` or fail with "expected `kind`".
    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            return Ok(self.advance().span);
        }
        Err(self.unexpected(format!("`{kind}`")))
    }

    /// Consume the closing delimiter matching an opener at `opened_at`.
    fn expect_closing(
        &mut self,
        kind: &TokenKind,
        delimiter: char,
        opened_at: Span,
    ) -> Result<Span, ParseError> {
        if self.cursor.is_at_end() {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedDelimiter {
                    delimiter,
                    opened_at,
                },
                self.current_span(),
            ));
        }
        self.expect(kind)
    }

    fn expect_ident(&mut self) -> Result<tern_ir::Ident, ParseError> {
        let token = self.cursor.current();
        if let TokenKind::Ident(name) = &token.kind {
            self.advance();
            return Ok(tern_ir::Ident::new(name.clone(), token.span));
        }
        Err(ParseError::new(
            ParseErrorKind::ExpectedIdentifier {
                found: token.kind.describe(),
            },
            token.span,
        ))
    }

    fn unexpected(&self, expected: String) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected,
                found: self.current_kind().describe(),
            },
            self.current_span(),
        )
    }

    fn match_binary_op(&self) -> Option<BinaryOp> {
        let op = match self.current_kind() {
            TokenKind::PipePipe => BinaryOp::Or,
            TokenKind::AmpAmp => BinaryOp::And,
            TokenKind::Pipe => BinaryOp::BitOr,
            TokenKind::Caret => BinaryOp::BitXor,
            TokenKind::Amp => BinaryOp::BitAnd,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::Shl => BinaryOp::Shl,
            TokenKind::Shr => BinaryOp::Shr,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            TokenKind::StarStar => BinaryOp::Pow,
            _ => return None,
        };
        Some(op)
    }

    /// Skip to the next statement boundary after an error.
    ///
    /// Always consumes at least one token unless already at `Eof`.
    fn synchronize(&mut self, start: usize) {
        if self.cursor.position() == start {
            self.advance();
        }
        loop {
            match self.current_kind() {
                TokenKind::Eof
                | TokenKind::RBrace
                | TokenKind::Let
                | TokenKind::Return
                | TokenKind::While
                | TokenKind::For => return,
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Parse the whole token stream.
    pub fn parse_program(mut self) -> ParseOutput {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            if self.cursor.eat(&TokenKind::Semicolon) {
                continue;
            }
            let start = self.cursor.position();
            match self.parse_stmt() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    tracing::debug!(%err, "parse error, synchronizing");
                    self.errors.push(err);
                    self.synchronize(start);
                }
            }
        }
        ParseOutput {
            program: Program { statements },
            errors: self.errors,
        }
    }
}

/// Parse a token stream produced by [`tern_lexer::lex`].
pub fn parse(tokens: &[Token]) -> ParseOutput {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests;

//! Token cursor for navigating the token stream.

use tern_ir::Span;
use tern_lexer::{Token, TokenKind};

static EOF: Token = Token {
    kind: TokenKind::Eof,
    span: Span::DUMMY,
};

/// Cursor over a token slice whose last element is `Eof`.
///
/// Reading past the end keeps returning the final token, so callers never
/// need bounds checks.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Span of the most recently consumed token.
    previous: Span,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor {
            tokens,
            pos: 0,
            previous: Span::DUMMY,
        }
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF)
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token; used to close node spans.
    #[inline]
    pub fn previous_span(&self) -> Span {
        self.previous
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Consume the current token and return it. `Eof` is never consumed.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.previous = token.span;
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }
}

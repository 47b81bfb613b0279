//! Statement parsing.

use tern_ir::{Block, Stmt, StmtKind};
use tern_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::While => return self.parse_while(),
            TokenKind::For => return self.parse_for(),
            TokenKind::Return => {
                self.advance();
                let value = if self.check(&TokenKind::Semicolon)
                    || self.check(&TokenKind::RBrace)
                    || self.cursor.is_at_end()
                {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                StmtKind::Return(value)
            }
            TokenKind::Break => {
                self.advance();
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.advance();
                StmtKind::Continue
            }
            _ => self.parse_simple_stmt()?.kind,
        };
        self.cursor.eat(&TokenKind::Semicolon);
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    /// `let` binding or expression statement, without its terminator.
    fn parse_simple_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        let kind = if self.cursor.eat(&TokenKind::Let) {
            let name = self.expect_ident()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_expr()?;
            StmtKind::Let { name, value }
        } else {
            StmtKind::Expr(self.parse_expr()?)
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span;
        let open = self.expect(&TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect_closing(&TokenKind::RParen, '(', open)?;
        let body = self.parse_block()?;
        Ok(Stmt::new(
            StmtKind::While { condition, body },
            self.span_from(start),
        ))
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span;
        let open = self.expect(&TokenKind::LParen)?;

        let init = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_simple_stmt()?))
        };
        self.expect(&TokenKind::Semicolon)?;

        let condition = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::Semicolon)?;

        let update = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect_closing(&TokenKind::RParen, '(', open)?;

        let body = self.parse_block()?;
        Ok(Stmt::new(
            StmtKind::For {
                init,
                condition,
                update,
                body,
            },
            self.span_from(start),
        ))
    }

    /// `{ stmt* }`. Errors inside the block are recorded and skipped so the
    /// rest of the block still parses.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let open = self.expect(&TokenKind::LBrace)?;
        let mut statements = Vec::new();

        while !self.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            if self.cursor.eat(&TokenKind::Semicolon) {
                continue;
            }
            let start = self.cursor.position();
            match self.parse_stmt() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    self.errors.push(err);
                    self.synchronize(start);
                }
            }
        }

        self.expect_closing(&TokenKind::RBrace, '{', open)?;
        Ok(Block {
            statements,
            span: self.span_from(open),
        })
    }
}

//! Expression parsing.
//!
//! Precedence, lowest to highest: `=`, the binary operators ordered by
//! [`BinaryOp::binding_power`], prefix `- ! ~`, then call and index.

use tern_ir::{Block, Expr, ExprKind, FunctionLit, Stmt, StmtKind, UnaryOp};
use tern_lexer::TokenKind;
use tern_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseErrorKind, Parser};

/// Below every binary operator's binding power.
const MIN_BINDING_POWER: u8 = 1;

impl Parser<'_> {
    /// Parse an expression, including a trailing assignment.
    ///
    /// Uses `ensure_sufficient_stack` to prevent stack overflow
    /// on deeply nested expressions.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_inner())
    }

    fn parse_expr_inner(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_binary(MIN_BINDING_POWER)?;

        // Assignment is right-associative: `a = b = c` is `a = (b = c)`.
        if self.cursor.eat(&TokenKind::Eq) {
            let value = self.parse_expr()?;
            let span = left.span.merge(value.span);
            return Ok(Expr::new(
                ExprKind::Assign {
                    target: Box::new(left),
                    value: Box::new(value),
                },
                span,
            ));
        }

        Ok(left)
    }

    fn parse_binary(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.match_binary_op() {
            let bp = op.binding_power();
            if bp < min_bp {
                break;
            }
            self.advance();
            let next_min = if op.is_right_associative() { bp } else { bp + 1 };
            let right = self.parse_binary(next_min)?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Tilde => UnaryOp::BitNot,
            _ => return self.parse_postfix(),
        };
        let start = self.advance().span;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.current_kind() {
                TokenKind::LParen => {
                    let open = self.advance().span;
                    let args = self.parse_expr_list(&TokenKind::RParen, '(', open)?;
                    let span = self.span_from(expr.span);
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                TokenKind::LBracket => {
                    let open = self.advance().span;
                    let index = self.parse_expr()?;
                    self.expect_closing(&TokenKind::RBracket, '[', open)?;
                    let span = self.span_from(expr.span);
                    expr = Expr::new(
                        ExprKind::Index {
                            target: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        let span = token.span;
        let kind = match &token.kind {
            TokenKind::Int(n) => ExprKind::Int(*n),
            TokenKind::Decimal(d) => ExprKind::Decimal(*d),
            TokenKind::Str(s) => ExprKind::Str(s.clone()),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::Ident(name) => ExprKind::Ident(name.clone()),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect_closing(&TokenKind::RParen, '(', span)?;
                return Ok(Expr::new(inner.kind, self.span_from(span)));
            }
            TokenKind::LBracket => {
                self.advance();
                let elements = self.parse_expr_list(&TokenKind::RBracket, '[', span)?;
                return Ok(Expr::new(ExprKind::Array(elements), self.span_from(span)));
            }
            TokenKind::LBrace => return self.parse_hash(),
            TokenKind::If => return self.parse_if(),
            TokenKind::Fn => return self.parse_function(),
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedExpression {
                        found: other.describe(),
                    },
                    span,
                ))
            }
        };
        self.advance();
        Ok(Expr::new(kind, span))
    }

    /// Comma-separated expressions up to `close`; the opener is consumed.
    /// A trailing comma is allowed.
    fn parse_expr_list(
        &mut self,
        close: &TokenKind,
        delimiter: char,
        open: tern_ir::Span,
    ) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        while !self.check(close) && !self.cursor.is_at_end() {
            items.push(self.parse_expr()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(close, delimiter, open)?;
        Ok(items)
    }

    /// `{ key: value, ... }`
    fn parse_hash(&mut self) -> Result<Expr, ParseError> {
        let open = self.advance().span;
        let mut pairs = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            let key = self.parse_expr()?;
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_expr()?;
            pairs.push((key, value));
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(&TokenKind::RBrace, '{', open)?;
        Ok(Expr::new(ExprKind::Hash(pairs), self.span_from(open)))
    }

    /// `if (cond) { ... } else { ... }`; `else if` nests as a one-statement
    /// alternative block.
    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        let start = self.advance().span;
        let open = self.expect(&TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect_closing(&TokenKind::RParen, '(', open)?;
        let consequence = self.parse_block()?;

        let alternative = if self.cursor.eat(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                let nested = ensure_sufficient_stack(|| self.parse_if())?;
                let span = nested.span;
                Some(Block {
                    statements: vec![Stmt::new(StmtKind::Expr(nested), span)],
                    span,
                })
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        Ok(Expr::new(
            ExprKind::If {
                condition: Box::new(condition),
                consequence,
                alternative,
            },
            self.span_from(start),
        ))
    }

    /// `fn(a, b) { ... }`
    fn parse_function(&mut self) -> Result<Expr, ParseError> {
        let start = self.advance().span;
        let open = self.expect(&TokenKind::LParen)?;

        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) && !self.cursor.is_at_end() {
            params.push(self.expect_ident()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(&TokenKind::RParen, '(', open)?;

        let body = self.parse_block()?;
        Ok(Expr::new(
            ExprKind::Function(FunctionLit {
                name: None,
                params,
                body,
            }),
            self.span_from(start),
        ))
    }
}

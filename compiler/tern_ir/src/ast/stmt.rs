//! Statement nodes.

use super::{Expr, Ident};
use crate::Span;

/// A parsed compilation unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// A brace-delimited statement list.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// Statement variants.
#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `let name = value;`
    Let { name: Ident, value: Expr },
    /// `return;` / `return value;`
    Return(Option<Expr>),
    /// An expression evaluated for its effect; its value is discarded.
    Expr(Expr),
    /// `while (condition) { ... }`
    While { condition: Expr, body: Block },
    /// `for (init; condition; update) { ... }`, every clause optional.
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        update: Option<Expr>,
        body: Block,
    },
    Break,
    Continue,
}

//! Expression nodes.

use super::{BinaryOp, Block, UnaryOp};
use crate::Span;

/// An identifier occurrence with its span.
#[derive(Clone, Debug, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// True for function literals (used to name `let f = fn ...` bindings).
    pub fn is_function(&self) -> bool {
        matches!(self.kind, ExprKind::Function(_))
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    // Literals
    Int(i64),
    Decimal(f64),
    Str(String),
    Bool(bool),
    Null,

    /// Variable reference.
    Ident(String),

    /// Prefix operation: `-x`, `!x`, `~x`.
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Infix operation: `left op right`.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `if (cond) { ... } else { ... }`; evaluates to the taken branch's
    /// trailing expression, or null.
    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },

    /// `fn(a, b) { ... }`
    Function(FunctionLit),

    /// `callee(args...)`
    Call { callee: Box<Expr>, args: Vec<Expr> },

    /// `[a, b, c]`
    Array(Vec<Expr>),

    /// `{k: v, ...}`
    Hash(Vec<(Expr, Expr)>),

    /// `target[index]`
    Index { target: Box<Expr>, index: Box<Expr> },

    /// `target = value`, where target is an identifier or an index expression.
    Assign { target: Box<Expr>, value: Box<Expr> },
}

/// A function literal.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLit {
    /// Binding name, set when the literal is the value of a `let`.
    pub name: Option<String>,
    pub params: Vec<Ident>,
    pub body: Block,
}

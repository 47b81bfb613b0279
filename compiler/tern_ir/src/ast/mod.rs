//! Abstract syntax tree.
//!
//! Produced by `tern_parse`, consumed by `tern_compiler`. Every node carries
//! the span of the source text it was parsed from; the compiler copies those
//! spans into the bytecode line table.

mod expr;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind, FunctionLit, Ident};
pub use operators::{BinaryOp, UnaryOp};
pub use stmt::{Block, Program, Stmt, StmtKind};

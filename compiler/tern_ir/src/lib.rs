//! Tern IR - syntax tree types shared by the front end and the compiler.
//!
//! This crate contains:
//! - `Span` for byte-offset source locations
//! - The tagged AST (`Program`, `Stmt`, `Expr`, `Block`, `FunctionLit`)
//! - `BinaryOp` / `UnaryOp`
//!
//! The AST is a closed set of enums. Consumers walk it with a single
//! recursive `match` per node kind; there is no visitor trait.

/// Fail the build if `$ty` is not `$size` bytes.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod span;

pub use ast::{BinaryOp, Block, Expr, ExprKind, FunctionLit, Ident, Program, Stmt, StmtKind, UnaryOp};
pub use span::Span;

//! Bytecode compiler for Tern.
//!
//! # Pipeline
//!
//! ```text
//! Program ──compile──▶ ObjectCode ──link──▶ ByteCode ──▶ tern_vm
//! ```
//!
//! - [`symbol_table`]: lexical contexts, call depths and the 16-bit
//!   storage-class encoding of `GET`/`SET` operands
//! - [`compile`] / [`Compiler`]: one pass over the AST, one
//!   [`CompilationUnit`] per function body
//! - [`link()`]: turns the single compiled unit into an executable program
//!
//! Every emitted instruction records the span of the node that produced
//! it, so the VM can point runtime errors at source text.

mod compiler;
mod error;
mod link;
mod object;
pub mod symbol_table;
mod unit;

pub use compiler::{compile, Compiler, CompilerState};
pub use error::{CompileError, CompileErrorKind};
pub use link::{link, LinkError};
pub use object::{ByteCode, ObjectCode};
pub use symbol_table::{Symbol, SymbolError, SymbolScope, SymbolTable};
pub use unit::CompilationUnit;

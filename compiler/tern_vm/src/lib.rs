//! Stack virtual machine for Tern bytecode.
//!
//! ```text
//! ByteCode ──Vm::new / VmBuilder──▶ Vm ──run──▶ last_popped()
//! ```
//!
//! Storage is bounded: the operand stack, the frame stack and the global
//! table are allocated once from [`VmConfig`] and never grow. Running past
//! any of them is a [`RuntimeError`], as is exhausting the optional
//! instruction budget.

mod builder;
mod config;
mod error;
mod frame;
mod stack;
mod vm;

pub use builder::VmBuilder;
pub use config::{ConfigError, VmConfig, DEFAULT_FRAME_CAPACITY, DEFAULT_STACK_CAPACITY, MAX_GLOBALS};
pub use error::{RuntimeError, RuntimeErrorKind};
pub use frame::Frame;
pub use stack::Stack;
pub use vm::Vm;

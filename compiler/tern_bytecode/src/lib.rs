//! Bytecode layer shared by the compiler and the VM.
//!
//! An instruction is one opcode byte followed by its operands, each a
//! big-endian `u16`. [`make`] encodes one instruction, [`decode_at`] reads
//! one back, and [`Instructions`] disassembles a whole buffer in the fixed
//! text layout developer tooling consumes:
//!
//! ```text
//! 0000:  CONSTANT               0
//! 0003:  CONSTANT               1
//! 0006:  ADD
//! ```

mod instructions;
mod line_table;
mod opcode;

pub use instructions::{decode_at, make, read_u16, DecodeError, EncodeError, Instructions, Operands};
pub use line_table::LineTable;
pub use opcode::{Definition, OpCode};

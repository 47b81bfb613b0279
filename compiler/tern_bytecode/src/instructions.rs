//! Instruction encoding, decoding and disassembly.

use std::fmt;
use std::ops::{Deref, DerefMut};

use smallvec::SmallVec;
use thiserror::Error;

use crate::OpCode;

/// Decoded operands of one instruction (at most two).
pub type Operands = SmallVec<[u16; 2]>;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum EncodeError {
    #[error("{op} takes {expected} operand(s), got {got}")]
    OperandCount {
        op: OpCode,
        expected: usize,
        got: usize,
    },
    #[error("operand {value} of {op} does not fit in 16 bits")]
    OperandOverflow { op: OpCode, value: usize },
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DecodeError {
    #[error("unknown opcode {byte:#04x} at offset {offset}")]
    UnknownOpcode { byte: u8, offset: usize },
    #[error("instruction at offset {offset} is truncated")]
    Truncated { offset: usize },
}

/// Encode one instruction.
pub fn make(op: OpCode, operands: &[usize]) -> Result<SmallVec<[u8; 5]>, EncodeError> {
    let def = op.definition();
    if operands.len() != def.operand_widths.len() {
        return Err(EncodeError::OperandCount {
            op,
            expected: def.operand_widths.len(),
            got: operands.len(),
        });
    }

    let mut bytes = SmallVec::new();
    bytes.push(op.as_byte());
    for &operand in operands {
        let value =
            u16::try_from(operand).map_err(|_| EncodeError::OperandOverflow { op, value: operand })?;
        bytes.extend_from_slice(&value.to_be_bytes());
    }
    Ok(bytes)
}

/// Read the big-endian `u16` at `offset`.
#[inline]
pub fn read_u16(bytes: &[u8], offset: usize) -> Option<u16> {
    let hi = *bytes.get(offset)?;
    let lo = *bytes.get(offset + 1)?;
    Some(u16::from_be_bytes([hi, lo]))
}

/// Decode the instruction at `offset`, returning it with the offset of the
/// next instruction.
pub fn decode_at(bytes: &[u8], offset: usize) -> Result<(OpCode, Operands, usize), DecodeError> {
    let byte = *bytes.get(offset).ok_or(DecodeError::Truncated { offset })?;
    let op = OpCode::try_from(byte).map_err(|byte| DecodeError::UnknownOpcode { byte, offset })?;

    let mut operands = Operands::new();
    let mut cursor = offset + 1;
    for &width in op.definition().operand_widths {
        let value = read_u16(bytes, cursor).ok_or(DecodeError::Truncated { offset })?;
        operands.push(value);
        cursor += width;
    }
    Ok((op, operands, cursor))
}

/// A linear instruction buffer.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Instructions(Vec<u8>);

impl Instructions {
    pub fn new() -> Self {
        Instructions(Vec::new())
    }

    /// Iterate decoded instructions as `(offset, opcode, operands)`.
    ///
    /// Stops after the first undecodable instruction, yielding its error.
    pub fn iter(&self) -> impl Iterator<Item = Result<(usize, OpCode, Operands), DecodeError>> + '_ {
        let mut offset = 0;
        let mut failed = false;
        std::iter::from_fn(move || {
            if failed || offset >= self.0.len() {
                return None;
            }
            match decode_at(&self.0, offset) {
                Ok((op, operands, next)) => {
                    let at = offset;
                    offset = next;
                    Some(Ok((at, op, operands)))
                }
                Err(err) => {
                    failed = true;
                    Some(Err(err))
                }
            }
        })
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Instructions {
    fn from(bytes: Vec<u8>) -> Self {
        Instructions(bytes)
    }
}

impl Deref for Instructions {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Instructions {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<u8> for Instructions {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Instructions(iter.into_iter().collect())
    }
}

/// One line per instruction:
/// `{offset:04}:  {mnemonic:<16}{operand:>8}...`
impl fmt::Display for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.iter() {
            match item {
                Ok((offset, op, operands)) => {
                    write!(f, "{offset:04}:  {:<16}", op.mnemonic())?;
                    for operand in &operands {
                        write!(f, "{operand:>8}")?;
                    }
                    writeln!(f)?;
                }
                Err(err) => writeln!(f, "ERROR: {err}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instructions(\n{self})")
    }
}

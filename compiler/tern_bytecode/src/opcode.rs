//! Opcode definitions.

use std::fmt;

/// One byte instruction tag.
///
/// Operand widths are listed in [`OpCode::definition`]; every operand is
/// two bytes wide.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum OpCode {
    // Literals
    /// Push `constants[idx]`.
    Constant = 0,
    True,
    False,
    Null,

    Pop,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,

    // Comparison and logic
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    And,
    Or,

    // Unary
    Negate,
    Not,
    BitNot,

    // Control flow (absolute targets)
    Jump,
    JumpIfFalse,

    // Aggregates
    /// Pop `n` elements into an array.
    Array,
    /// Pop `n` values (`n / 2` key/value pairs) into a hash.
    Hash,
    Index,

    // Scoped storage (operand is an encoded symbol index)
    Get,
    Set,
    /// Pops index and value, writes into a clone of the target aggregate,
    /// stores the clone back and pushes the value.
    SetAssign,

    // Calls
    Call,
    Return,
    ReturnValue,
    /// Operands: function constant index, free value count.
    Closure,
    CurrentClosure,
}

/// Mnemonic and operand layout of an opcode.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Definition {
    pub name: &'static str,
    pub operand_widths: &'static [usize],
}

impl Definition {
    /// Encoded size including the opcode byte.
    pub fn instruction_len(&self) -> usize {
        1 + self.operand_widths.iter().sum::<usize>()
    }
}

const NONE: &[usize] = &[];
const ONE_U16: &[usize] = &[2];
const TWO_U16: &[usize] = &[2, 2];

impl OpCode {
    /// All opcodes in byte order.
    pub const ALL: &'static [OpCode] = &[
        OpCode::Constant,
        OpCode::True,
        OpCode::False,
        OpCode::Null,
        OpCode::Pop,
        OpCode::Add,
        OpCode::Sub,
        OpCode::Mul,
        OpCode::Div,
        OpCode::Mod,
        OpCode::BitAnd,
        OpCode::BitOr,
        OpCode::BitXor,
        OpCode::Shl,
        OpCode::Shr,
        OpCode::Equal,
        OpCode::NotEqual,
        OpCode::Greater,
        OpCode::GreaterEqual,
        OpCode::Less,
        OpCode::LessEqual,
        OpCode::And,
        OpCode::Or,
        OpCode::Negate,
        OpCode::Not,
        OpCode::BitNot,
        OpCode::Jump,
        OpCode::JumpIfFalse,
        OpCode::Array,
        OpCode::Hash,
        OpCode::Index,
        OpCode::Get,
        OpCode::Set,
        OpCode::SetAssign,
        OpCode::Call,
        OpCode::Return,
        OpCode::ReturnValue,
        OpCode::Closure,
        OpCode::CurrentClosure,
    ];

    #[inline]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    pub const fn definition(self) -> Definition {
        let (name, operand_widths) = match self {
            OpCode::Constant => ("CONSTANT", ONE_U16),
            OpCode::True => ("TRUE", NONE),
            OpCode::False => ("FALSE", NONE),
            OpCode::Null => ("NULL", NONE),
            OpCode::Pop => ("POP", NONE),
            OpCode::Add => ("ADD", NONE),
            OpCode::Sub => ("SUB", NONE),
            OpCode::Mul => ("MUL", NONE),
            OpCode::Div => ("DIV", NONE),
            OpCode::Mod => ("MOD", NONE),
            OpCode::BitAnd => ("BIT_AND", NONE),
            OpCode::BitOr => ("BIT_OR", NONE),
            OpCode::BitXor => ("BIT_XOR", NONE),
            OpCode::Shl => ("SHL", NONE),
            OpCode::Shr => ("SHR", NONE),
            OpCode::Equal => ("EQUAL", NONE),
            OpCode::NotEqual => ("NOT_EQUAL", NONE),
            OpCode::Greater => ("GT", NONE),
            OpCode::GreaterEqual => ("GTE", NONE),
            OpCode::Less => ("LT", NONE),
            OpCode::LessEqual => ("LTE", NONE),
            OpCode::And => ("AND", NONE),
            OpCode::Or => ("OR", NONE),
            OpCode::Negate => ("NEGATE", NONE),
            OpCode::Not => ("NOT", NONE),
            OpCode::BitNot => ("BNOT", NONE),
            OpCode::Jump => ("JUMP", ONE_U16),
            OpCode::JumpIfFalse => ("JUMP_IF_FALSE", ONE_U16),
            OpCode::Array => ("ARRAY", ONE_U16),
            OpCode::Hash => ("HASH", ONE_U16),
            OpCode::Index => ("INDEX", NONE),
            OpCode::Get => ("GET", ONE_U16),
            OpCode::Set => ("SET", ONE_U16),
            OpCode::SetAssign => ("SET_ASSIGN", ONE_U16),
            OpCode::Call => ("CALL", ONE_U16),
            OpCode::Return => ("RETURN", NONE),
            OpCode::ReturnValue => ("RETURN_VALUE", NONE),
            OpCode::Closure => ("CLOSURE", TWO_U16),
            OpCode::CurrentClosure => ("CURRENT_CLOSURE", NONE),
        };
        Definition {
            name,
            operand_widths,
        }
    }

    #[inline]
    pub const fn mnemonic(self) -> &'static str {
        self.definition().name
    }
}

impl TryFrom<u8> for OpCode {
    type Error = u8;

    #[inline]
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        OpCode::ALL.get(usize::from(byte)).copied().ok_or(byte)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

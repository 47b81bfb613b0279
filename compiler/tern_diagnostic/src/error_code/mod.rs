//! Error codes for all toolchain diagnostics.
//!
//! Each code is a unique identifier (e.g. `E3002`) whose first digit names
//! the phase that produced it. `ternc explain <code>` prints the description.

use std::fmt;
use std::str::FromStr;

/// Error codes for all toolchain diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E3xxx: Compiler / symbol resolution errors
/// - E5xxx: Linker errors
/// - E6xxx: Runtime (VM) errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Invalid character or malformed token
    E0001,
    /// Unterminated string literal
    E0002,
    /// Integer literal out of range
    E0003,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,

    // Compiler Errors (E3xxx)
    /// Operator has no instruction
    E3001,
    /// Symbol not found
    E3002,
    /// Symbol index overflow
    E3003,
    /// Invalid assignment target
    E3004,
    /// `break` outside of a loop
    E3005,
    /// `continue` outside of a loop
    E3006,
    /// Constant pool overflow
    E3007,
    /// Jump target out of range
    E3008,
    /// Operand value too large
    E3009,

    // Linker Errors (E5xxx)
    /// Nothing to link
    E5001,
    /// Multiple units cannot be linked
    E5002,

    // Runtime Errors (E6xxx)
    /// Type mismatch / unsupported operand
    E6001,
    /// Wrong number of arguments
    E6002,
    /// Index out of bounds or invalid index
    E6003,
    /// Operand stack overflow
    E6004,
    /// Call frame overflow
    E6005,
    /// Operand stack underflow
    E6006,
    /// Unknown opcode
    E6007,
    /// Calling a non-function
    E6008,
    /// Division or modulo by zero
    E6009,
    /// Integer overflow
    E6010,
    /// Unusable hash key
    E6011,
    /// Builtin function failure
    E6012,
    /// Instruction budget exhausted
    E6013,
    /// Other runtime error
    E6099,

    // Internal Errors (E9xxx)
    /// Internal toolchain error
    E9001,
}

impl ErrorCode {
    /// All error codes, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E3006,
        ErrorCode::E3007,
        ErrorCode::E3008,
        ErrorCode::E3009,
        ErrorCode::E5001,
        ErrorCode::E5002,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E6007,
        ErrorCode::E6008,
        ErrorCode::E6009,
        ErrorCode::E6010,
        ErrorCode::E6011,
        ErrorCode::E6012,
        ErrorCode::E6013,
        ErrorCode::E6099,
        ErrorCode::E9001,
    ];

    /// Get the code as a string (e.g., "E3002").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E3009 => "E3009",
            ErrorCode::E5001 => "E5001",
            ErrorCode::E5002 => "E5002",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6012 => "E6012",
            ErrorCode::E6013 => "E6013",
            ErrorCode::E6099 => "E6099",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line description, used by `ternc explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "invalid character or malformed token",
            ErrorCode::E0002 => "unterminated string literal",
            ErrorCode::E0003 => "integer literal does not fit in 64 bits",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected an expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "expected an identifier",
            ErrorCode::E3001 => "the operator has no bytecode instruction",
            ErrorCode::E3002 => "the name is not defined in any enclosing scope or as a builtin",
            ErrorCode::E3003 => "more than 16384 symbols of one storage class in one scope",
            ErrorCode::E3004 => "only variables and indexed variables can be assigned",
            ErrorCode::E3005 => "`break` used outside of a loop",
            ErrorCode::E3006 => "`continue` used outside of a loop",
            ErrorCode::E3007 => "more than 65536 constants in one program",
            ErrorCode::E3008 => "a function body is too large for 16-bit jump targets",
            ErrorCode::E3009 => "an instruction operand does not fit in 16 bits",
            ErrorCode::E5001 => "the linker was given no compiled units",
            ErrorCode::E5002 => "linking more than one compiled unit is not supported",
            ErrorCode::E6001 => "operand kinds cannot be unified for this operation",
            ErrorCode::E6002 => "a function was called with the wrong number of arguments",
            ErrorCode::E6003 => "array index missing, not an integer, or out of bounds",
            ErrorCode::E6004 => "the operand stack capacity was exceeded",
            ErrorCode::E6005 => "the call frame capacity was exceeded (recursion too deep)",
            ErrorCode::E6006 => "an instruction popped from an empty operand stack",
            ErrorCode::E6007 => "the instruction stream contains an unknown opcode",
            ErrorCode::E6008 => "the called value is not a function",
            ErrorCode::E6009 => "division or modulo by zero",
            ErrorCode::E6010 => "integer arithmetic overflowed",
            ErrorCode::E6011 => "the value cannot be used as a hash key",
            ErrorCode::E6012 => "a builtin function reported an error",
            ErrorCode::E6013 => "the configured instruction budget was exhausted",
            ErrorCode::E6099 => "runtime error",
            ErrorCode::E9001 => "internal toolchain error",
        }
    }

    /// Check if this is a lexer error (E0xxx).
    pub fn is_lexer_error(&self) -> bool {
        matches!(self, ErrorCode::E0001 | ErrorCode::E0002 | ErrorCode::E0003)
    }

    /// Check if this is a parser error (E1xxx).
    pub fn is_parser_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003 | ErrorCode::E1004
        )
    }

    /// Check if this is a compiler error (E3xxx).
    pub fn is_compile_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }

    /// Check if this is a linker error (E5xxx).
    pub fn is_link_error(&self) -> bool {
        matches!(self, ErrorCode::E5001 | ErrorCode::E5002)
    }

    /// Check if this is a runtime error (E6xxx).
    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == upper)
            .ok_or_else(|| format!("unknown error code: {s}"))
    }
}

#[cfg(test)]
mod tests;

//! Compiler and linker outputs.

use std::fmt;

use tern_bytecode::{Instructions, LineTable};
use tern_value::Value;

/// Output of compiling one unit.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectCode {
    pub unit_name: String,
    pub instructions: Instructions,
    pub constants: Vec<Value>,
    pub lines: LineTable,
}

/// Linked program, ready for the VM.
#[derive(Clone, Debug, PartialEq)]
pub struct ByteCode {
    pub instructions: Instructions,
    pub constants: Vec<Value>,
    pub lines: LineTable,
}

impl fmt::Display for ObjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_listing(f, &self.unit_name, &self.instructions, &self.constants)
    }
}

impl fmt::Display for ByteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_listing(f, "main", &self.instructions, &self.constants)
    }
}

/// Entry instructions, the constant pool, then each function constant's body.
fn write_listing(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    instructions: &Instructions,
    constants: &[Value],
) -> fmt::Result {
    writeln!(f, "== {name} ==")?;
    write!(f, "{instructions}")?;

    if !constants.is_empty() {
        writeln!(f)?;
        writeln!(f, "== constants ==")?;
        for (i, constant) in constants.iter().enumerate() {
            match constant {
                Value::Str(s) => writeln!(f, "{i:>4}: {s:?}")?,
                other => writeln!(f, "{i:>4}: {other}")?,
            }
        }
    }

    for (i, constant) in constants.iter().enumerate() {
        if let Value::Function(function) = constant {
            let label = function.name.as_deref().unwrap_or("<anonymous>");
            writeln!(f)?;
            writeln!(
                f,
                "== fn {label} (constant {i}, params {}, locals {}) ==",
                function.num_params, function.num_locals
            )?;
            write!(f, "{}", function.instructions)?;
        }
    }
    Ok(())
}

//! Linking compiled units into an executable program.
//!
//! Only single-unit programs are supported: there is no cross-unit
//! relocation, so a second unit is rejected rather than dropped.

use tern_diagnostic::{Diagnostic, ErrorCode};
use thiserror::Error;

use crate::{ByteCode, ObjectCode};

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum LinkError {
    #[error("nothing to link")]
    Empty,
    #[error("cannot link {count} units: cross-unit linking is not supported")]
    MultipleUnits { count: usize, names: Vec<String> },
}

impl LinkError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LinkError::Empty => ErrorCode::E5001,
            LinkError::MultipleUnits { .. } => ErrorCode::E5002,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            LinkError::Empty => diag,
            LinkError::MultipleUnits { names, .. } => {
                diag.with_note(format!("units: {}", names.join(", ")))
            }
        }
    }
}

pub fn link(units: Vec<ObjectCode>) -> Result<ByteCode, LinkError> {
    if units.len() > 1 {
        return Err(LinkError::MultipleUnits {
            count: units.len(),
            names: units.into_iter().map(|unit| unit.unit_name).collect(),
        });
    }
    let unit = units.into_iter().next().ok_or(LinkError::Empty)?;

    tracing::debug!(
        unit = %unit.unit_name,
        bytes = unit.instructions.len(),
        constants = unit.constants.len(),
        "linked"
    );
    Ok(ByteCode {
        instructions: unit.instructions,
        constants: unit.constants,
        lines: unit.lines,
    })
}

#[cfg(test)]
mod tests;

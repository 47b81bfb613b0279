//! VM capacities and limits.

use thiserror::Error;

pub const DEFAULT_STACK_CAPACITY: usize = 2048;
pub const DEFAULT_FRAME_CAPACITY: usize = 1024;
/// One slot per encodable global index.
pub const MAX_GLOBALS: usize = 0x4000;

/// Capacities are fixed for the lifetime of a VM; exceeding one is a
/// runtime error, never a reallocation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VmConfig {
    pub stack_capacity: usize,
    pub frame_capacity: usize,
    pub globals_capacity: usize,
    /// Maximum instructions to execute, or `None` for no limit.
    pub instruction_budget: Option<u64>,
}

impl Default for VmConfig {
    fn default() -> Self {
        VmConfig {
            stack_capacity: DEFAULT_STACK_CAPACITY,
            frame_capacity: DEFAULT_FRAME_CAPACITY,
            globals_capacity: MAX_GLOBALS,
            instruction_budget: None,
        }
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be at least 1")]
    Zero(&'static str),
    #[error("globals capacity {0} exceeds the encodable maximum of 16384")]
    TooManyGlobals(usize),
    #[error("{len} initial globals do not fit a capacity of {capacity}")]
    GlobalsTooLarge { len: usize, capacity: usize },
}

impl VmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stack_capacity == 0 {
            return Err(ConfigError::Zero("stack capacity"));
        }
        if self.frame_capacity == 0 {
            return Err(ConfigError::Zero("frame capacity"));
        }
        if self.globals_capacity > MAX_GLOBALS {
            return Err(ConfigError::TooManyGlobals(self.globals_capacity));
        }
        if self.instruction_budget == Some(0) {
            return Err(ConfigError::Zero("instruction budget"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;

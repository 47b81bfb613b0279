//! `VmBuilder` for creating VMs with non-default limits or carried-over
//! globals.

use tern_compiler::ByteCode;
use tern_value::{BuiltinRegistry, Value};

use crate::config::{ConfigError, VmConfig};
use crate::Vm;

/// Builder for [`Vm`].
///
/// Limits start at [`VmConfig::default`]; [`VmBuilder::build`] validates
/// them before any storage is allocated.
pub struct VmBuilder<'b> {
    bytecode: ByteCode,
    builtins: &'b dyn BuiltinRegistry,
    config: VmConfig,
    globals: Option<Vec<Value>>,
}

impl<'b> VmBuilder<'b> {
    pub fn new(bytecode: ByteCode, builtins: &'b dyn BuiltinRegistry) -> Self {
        VmBuilder {
            bytecode,
            builtins,
            config: VmConfig::default(),
            globals: None,
        }
    }

    /// Replace every limit at once.
    #[must_use]
    pub fn config(mut self, config: VmConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn stack_capacity(mut self, capacity: usize) -> Self {
        self.config.stack_capacity = capacity;
        self
    }

    /// Maximum call depth, the entry frame included.
    #[must_use]
    pub fn frame_capacity(mut self, capacity: usize) -> Self {
        self.config.frame_capacity = capacity;
        self
    }

    #[must_use]
    pub fn globals_capacity(mut self, capacity: usize) -> Self {
        self.config.globals_capacity = capacity;
        self
    }

    #[must_use]
    pub fn instruction_budget(mut self, budget: u64) -> Self {
        self.config.instruction_budget = Some(budget);
        self
    }

    /// Start from the globals of a previous run, as the REPL does between
    /// entries. Missing slots are filled with `null`.
    #[must_use]
    pub fn globals(mut self, globals: Vec<Value>) -> Self {
        self.globals = Some(globals);
        self
    }

    pub fn build(self) -> Result<Vm<'b>, ConfigError> {
        self.config.validate()?;
        let capacity = self.config.globals_capacity;
        let mut globals = self.globals.unwrap_or_default();
        if globals.len() > capacity {
            return Err(ConfigError::GlobalsTooLarge {
                len: globals.len(),
                capacity,
            });
        }
        globals.resize(capacity, Value::Null);
        Ok(Vm::from_parts(self.bytecode, self.builtins, self.config, globals))
    }
}

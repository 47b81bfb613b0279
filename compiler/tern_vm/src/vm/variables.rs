//! GET, SET and SET_ASSIGN over the four storage classes.
//!
//! Operands carry the storage class in their top two bits; see
//! [`tern_compiler::symbol_table::decode`].

use tern_compiler::symbol_table::decode;
use tern_compiler::SymbolScope;
use tern_value::Value;

use super::{collections, Result, Vm};
use crate::RuntimeErrorKind;

impl Vm<'_> {
    pub(super) fn load(&self, operand: u16) -> Result<Value> {
        let (scope, raw) = decode(operand);
        let index = usize::from(raw);
        match scope {
            SymbolScope::Global => self.globals.get(index).cloned().ok_or(
                RuntimeErrorKind::GlobalOutOfRange {
                    index,
                    capacity: self.globals.len(),
                },
            ),
            SymbolScope::Local => {
                let base = self.current_frame()?.base_pointer;
                self.stack.get(base + index).cloned()
            }
            SymbolScope::Extern => Ok(Value::Builtin(u32::from(raw))),
            SymbolScope::Free => self
                .current_frame()?
                .closure
                .free
                .get(index)
                .cloned()
                .ok_or(RuntimeErrorKind::MissingFreeVariable { index }),
            SymbolScope::Function => Ok(Value::Closure(self.current_frame()?.closure.clone())),
        }
    }

    /// Store into a global or local slot. Values reach here already copied.
    pub(super) fn store(&mut self, operand: u16, value: Value) -> Result {
        let (scope, index) = decode(operand);
        let index = usize::from(index);
        match scope {
            SymbolScope::Global => {
                let capacity = self.globals.len();
                let slot = self
                    .globals
                    .get_mut(index)
                    .ok_or(RuntimeErrorKind::GlobalOutOfRange { index, capacity })?;
                *slot = value;
                Ok(())
            }
            SymbolScope::Local => {
                let base = self.current_frame()?.base_pointer;
                self.stack.set(base + index, value)
            }
            SymbolScope::Extern => Err(RuntimeErrorKind::InvalidStoreTarget("a builtin")),
            SymbolScope::Free => Err(RuntimeErrorKind::InvalidStoreTarget("a captured variable")),
            SymbolScope::Function => Err(RuntimeErrorKind::InvalidStoreTarget("a function")),
        }
    }

    /// Pop the value, then the index; store a modified copy of the target
    /// and push the value as the expression's result.
    pub(super) fn set_assign(&mut self, operand: u16) -> Result {
        let value = self.stack.pop()?.deep_copy();
        let index = self.stack.pop()?;
        let target = self.load(operand)?;
        let updated = collections::assign_index(&target, &index, value.clone())?;
        self.store(operand, updated)?;
        self.stack.push(value)
    }
}


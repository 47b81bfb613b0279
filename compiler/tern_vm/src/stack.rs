//! Fixed-capacity operand stack.

use tern_value::Value;

use crate::RuntimeErrorKind;

/// Operand stack with a fixed number of slots.
///
/// Slots are allocated once and never grown. Popping leaves the value in
/// its slot, so the most recently popped value stays observable until the
/// slot is overwritten.
#[derive(Debug)]
pub struct Stack {
    slots: Vec<Value>,
    /// Next free slot.
    sp: usize,
}

type Result<T = ()> = std::result::Result<T, RuntimeErrorKind>;

impl Stack {
    pub fn with_capacity(capacity: usize) -> Self {
        Stack {
            slots: vec![Value::Null; capacity],
            sp: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn sp(&self) -> usize {
        self.sp
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    #[inline]
    pub fn push(&mut self, value: Value) -> Result {
        let capacity = self.slots.len();
        let slot = self
            .slots
            .get_mut(self.sp)
            .ok_or(RuntimeErrorKind::StackOverflow { capacity })?;
        *slot = value;
        self.sp += 1;
        Ok(())
    }

    #[inline]
    pub fn pop(&mut self) -> Result<Value> {
        if self.sp == 0 {
            return Err(RuntimeErrorKind::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.slots[self.sp].clone())
    }

    /// Value at the top of the stack, if any.
    pub fn top(&self) -> Option<&Value> {
        self.sp.checked_sub(1).map(|i| &self.slots[i])
    }

    /// The slot just above the top: the last value popped, or `Null` when
    /// nothing has been pushed there yet.
    pub fn last_popped(&self) -> &Value {
        self.slots.get(self.sp).unwrap_or(&Value::Null)
    }

    /// Value `distance` slots below the top (0 is the top).
    pub fn peek(&self, distance: usize) -> Result<&Value> {
        let index = self
            .sp
            .checked_sub(distance + 1)
            .ok_or(RuntimeErrorKind::StackUnderflow)?;
        Ok(&self.slots[index])
    }

    /// The top `n` values, bottom first.
    pub fn window(&self, n: usize) -> Result<&[Value]> {
        let start = self.sp.checked_sub(n).ok_or(RuntimeErrorKind::StackUnderflow)?;
        Ok(&self.slots[start..self.sp])
    }

    /// Drop the top `n` values.
    pub fn discard(&mut self, n: usize) -> Result {
        self.sp = self.sp.checked_sub(n).ok_or(RuntimeErrorKind::StackUnderflow)?;
        Ok(())
    }

    /// Absolute slot read, for locals.
    pub fn get(&self, index: usize) -> Result<&Value> {
        if index >= self.sp {
            return Err(RuntimeErrorKind::StackUnderflow);
        }
        Ok(&self.slots[index])
    }

    pub fn set(&mut self, index: usize, value: Value) -> Result {
        if index >= self.sp {
            return Err(RuntimeErrorKind::StackUnderflow);
        }
        self.slots[index] = value;
        Ok(())
    }

    /// Move the stack pointer to `sp`, clearing any newly exposed slots
    /// above `clear_from`.
    pub fn reserve_to(&mut self, clear_from: usize, sp: usize) -> Result {
        if sp > self.slots.len() {
            return Err(RuntimeErrorKind::StackOverflow {
                capacity: self.slots.len(),
            });
        }
        for slot in self.slots.iter_mut().take(sp).skip(clear_from) {
            *slot = Value::Null;
        }
        self.sp = sp;
        Ok(())
    }

    /// Lower the stack pointer to `sp`.
    pub fn truncate(&mut self, sp: usize) {
        self.sp = self.sp.min(sp);
    }

    /// Live slots, bottom first.
    pub fn as_slice(&self) -> &[Value] {
        &self.slots[..self.sp]
    }
}

#[cfg(test)]
mod tests;

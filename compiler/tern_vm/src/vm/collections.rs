//! ARRAY, HASH, INDEX and the indexed write behind SET_ASSIGN.

use tern_value::Value;

use super::{Result, Vm};
use crate::RuntimeErrorKind;

impl Vm<'_> {
    pub(super) fn build_array(&mut self, len: usize) -> Result {
        let items = self.stack.window(len)?.to_vec();
        self.stack.discard(len)?;
        self.stack.push(Value::array(items))
    }

    /// `len` counts keys and values, so `len / 2` pairs.
    pub(super) fn build_hash(&mut self, len: usize) -> Result {
        let pairs: Vec<(Value, Value)> = self
            .stack
            .window(len)?
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect();
        self.stack.discard(len)?;
        let hash = Value::hash(pairs).map_err(RuntimeErrorKind::UnhashableKey)?;
        self.stack.push(hash)
    }
}

/// `target[index]`. A missing hash key reads as `null`; an array index
/// must be in bounds.
pub(super) fn index(target: &Value, index: &Value) -> Result<Value> {
    match (target, index) {
        (Value::Array(items), Value::Int(i)) => element(items, *i).cloned(),
        (Value::Hash(map), key) => {
            let key = key
                .hash_key()
                .ok_or(RuntimeErrorKind::UnhashableKey(key.kind()))?;
            Ok(map
                .get(&key)
                .map_or(Value::Null, |pair| pair.value.clone()))
        }
        _ => Err(RuntimeErrorKind::UnsupportedIndex {
            target: target.kind(),
            index: index.kind(),
        }),
    }
}

/// A copy of `target` with `target[index] = value` applied; `target`
/// itself is left untouched.
pub(super) fn assign_index(target: &Value, index: &Value, value: Value) -> Result<Value> {
    match (target, index) {
        (Value::Array(items), Value::Int(i)) => {
            let slot = position(items, *i)?;
            let mut items = items.to_vec();
            items[slot] = value;
            Ok(Value::array(items))
        }
        (Value::Hash(map), key) => {
            if key.hash_key().is_none() {
                return Err(RuntimeErrorKind::UnhashableKey(key.kind()));
            }
            let pairs = map
                .values()
                .map(|pair| (pair.key.clone(), pair.value.clone()))
                .chain(std::iter::once((key.clone(), value)));
            Value::hash(pairs).map_err(RuntimeErrorKind::UnhashableKey)
        }
        _ => Err(RuntimeErrorKind::UnsupportedIndex {
            target: target.kind(),
            index: index.kind(),
        }),
    }
}

fn position(items: &[Value], index: i64) -> Result<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < items.len())
        .ok_or(RuntimeErrorKind::IndexOutOfBounds {
            index,
            len: items.len(),
        })
}

fn element(items: &[Value], index: i64) -> Result<&Value> {
    Ok(&items[position(items, index)?])
}

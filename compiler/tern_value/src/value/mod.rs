//! The closed value enum and its payload types.

use std::collections::BTreeMap;
use std::fmt;

use tern_bytecode::{Instructions, LineTable};
use tern_ir::Span;

use crate::Heap;

/// Runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    // Scalars (inline)
    Null,
    Bool(bool),
    Int(i64),
    Decimal(f64),

    // Heap types (constructed through factory methods)
    Str(Heap<String>),
    Array(Heap<Vec<Value>>),
    Hash(Heap<BTreeMap<HashKey, HashPair>>),
    Error(Heap<ErrorValue>),
    /// A function constant as emitted by the compiler; becomes callable once
    /// wrapped by `CLOSURE`.
    Function(Heap<CompiledFunction>),
    Closure(Heap<Closure>),
    /// Host function, by registry index.
    Builtin(u32),
}

/// Kind tag of a value; orders the coercion ranks and hash keys.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Decimal,
    Str,
    Array,
    Hash,
    Error,
    Function,
    Closure,
    Builtin,
}

impl ValueKind {
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Decimal => "decimal",
            ValueKind::Str => "string",
            ValueKind::Array => "array",
            ValueKind::Hash => "hash",
            ValueKind::Error => "error",
            ValueKind::Function => "function",
            ValueKind::Closure => "closure",
            ValueKind::Builtin => "builtin",
        }
    }

    /// Only scalar kinds can key a hash.
    pub const fn is_hashable(self) -> bool {
        matches!(
            self,
            ValueKind::Null | ValueKind::Bool | ValueKind::Int | ValueKind::Decimal | ValueKind::Str
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Composite hash key: the key's kind plus its display text, so `1` and
/// `"1"` are distinct keys.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct HashKey {
    pub kind: ValueKind,
    pub text: String,
}

/// A hash entry keeps the original key value for display and iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

/// Error value produced by the `error` builtin.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorValue {
    pub message: String,
    /// Source location of the call that created the error, when known.
    pub span: Option<Span>,
}

/// Compiled function body.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledFunction {
    pub instructions: Instructions,
    /// Local slots to reserve, parameters included.
    pub num_locals: u16,
    pub num_params: u16,
    pub name: Option<String>,
    pub lines: LineTable,
}

/// A function plus the free values captured when it was created.
#[derive(Clone, Debug, PartialEq)]
pub struct Closure {
    pub function: Heap<CompiledFunction>,
    pub free: Vec<Value>,
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    /// Build a hash from key/value pairs; later duplicates win.
    ///
    /// Fails with the offending kind when a key is not hashable.
    pub fn hash(pairs: impl IntoIterator<Item = (Value, Value)>) -> Result<Self, ValueKind> {
        let mut map = BTreeMap::new();
        for (key, value) in pairs {
            let hash_key = key.hash_key().ok_or(key.kind())?;
            map.insert(hash_key, HashPair { key, value });
        }
        Ok(Value::Hash(Heap::new(map)))
    }

    pub fn error(message: impl Into<String>, span: Option<Span>) -> Self {
        Value::Error(Heap::new(ErrorValue {
            message: message.into(),
            span,
        }))
    }

    pub fn function(function: CompiledFunction) -> Self {
        Value::Function(Heap::new(function))
    }

    pub fn closure(function: Heap<CompiledFunction>, free: Vec<Value>) -> Self {
        Value::Closure(Heap::new(Closure { function, free }))
    }

    /// Wrap a function with no captures, as the VM does for the entry point.
    pub fn main_closure(function: CompiledFunction) -> Heap<Closure> {
        Heap::new(Closure {
            function: Heap::new(function),
            free: Vec::new(),
        })
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Str(_) => ValueKind::Str,
            Value::Array(_) => ValueKind::Array,
            Value::Hash(_) => ValueKind::Hash,
            Value::Error(_) => ValueKind::Error,
            Value::Function(_) => ValueKind::Function,
            Value::Closure(_) => ValueKind::Closure,
            Value::Builtin(_) => ValueKind::Builtin,
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// `false` and `null` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }

    pub fn hash_key(&self) -> Option<HashKey> {
        let kind = self.kind();
        kind.is_hashable().then(|| HashKey {
            kind,
            text: self.to_string(),
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Copy with fresh allocations for every nested array and hash, so the
    /// result shares no aggregate with `self`.
    ///
    /// Strings, functions and closures are immutable and stay shared.
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Array(items) => Value::array(items.iter().map(Value::deep_copy).collect()),
            Value::Hash(map) => Value::Hash(Heap::new(
                map.iter()
                    .map(|(k, pair)| {
                        (
                            k.clone(),
                            HashPair {
                                key: pair.key.deep_copy(),
                                value: pair.value.deep_copy(),
                            },
                        )
                    })
                    .collect(),
            )),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            // Debug keeps the fractional part: `1.0`, not `1`.
            Value::Decimal(d) => write!(f, "{d:?}"),
            Value::Str(s) => f.write_str(s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Hash(map) => {
                f.write_str("{")?;
                for (i, pair) in map.values().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                f.write_str("}")
            }
            Value::Error(err) => write!(f, "ERROR: {}", err.message),
            Value::Function(func) => match &func.name {
                Some(name) => write!(f, "<fn {name}>"),
                None => f.write_str("<fn>"),
            },
            Value::Closure(closure) => match &closure.function.name {
                Some(name) => write!(f, "<closure {name}>"),
                None => f.write_str("<closure>"),
            },
            Value::Builtin(index) => write!(f, "<builtin #{index}>"),
        }
    }
}

#[cfg(test)]
mod tests;

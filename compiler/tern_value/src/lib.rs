//! Runtime values for the Tern VM.
//!
//! # Heap Enforcement
//!
//! Every aggregate is held through [`Heap<T>`], whose constructor is private
//! to this crate; external code builds values through the factory methods
//! on [`Value`] (`Value::string`, `Value::array`, `Value::closure`, ...).
//! Heap contents are never mutated in place: `SET_ASSIGN` writes into a
//! fresh copy, and scoped `SET` stores a [`Value::deep_copy`].
//!
//! The canonical `true`, `false` and `null` are plain variants compared by
//! value; there are no shared singleton objects.

mod builtins;
mod coerce;
mod heap;
mod value;

pub use builtins::{check_arity, BuiltinRegistry, NativeFn, StandardBuiltins};
pub use coerce::{coerce, rank};
pub use heap::Heap;
pub use value::{Closure, CompiledFunction, ErrorValue, HashKey, HashPair, Value, ValueKind};

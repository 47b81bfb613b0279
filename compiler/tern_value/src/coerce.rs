//! Operand coercion for binary operators.
//!
//! Scalar kinds are ranked `bool < int < decimal < string`. When two
//! operands differ in kind, the lower-ranked one is promoted to the other's
//! kind:
//!
//! | from \ to | int    | decimal | string       |
//! |-----------|--------|---------|--------------|
//! | bool      | 1 / 0  | 1.0/0.0 | display text |
//! | int       |        | as f64  | display text |
//! | decimal   |        |         | display text |
//!
//! Operands of the same kind are returned untouched, whatever the kind.

use crate::{Value, ValueKind};

/// Coercion rank of a kind, or `None` for kinds that never coerce.
pub fn rank(kind: ValueKind) -> Option<u8> {
    match kind {
        ValueKind::Bool => Some(0),
        ValueKind::Int => Some(1),
        ValueKind::Decimal => Some(2),
        ValueKind::Str => Some(3),
        _ => None,
    }
}

/// Unify the kinds of two operands.
///
/// Returns `None` when the kinds differ and either side is unrankable.
pub fn coerce(left: Value, right: Value) -> Option<(Value, Value)> {
    let (lk, rk) = (left.kind(), right.kind());
    if lk == rk {
        return Some((left, right));
    }
    let (lr, rr) = (rank(lk)?, rank(rk)?);
    if lr < rr {
        Some((promote(left, rk)?, right))
    } else {
        Some((left, promote(right, lk)?))
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "int to decimal promotion rounds large magnitudes"
)]
fn promote(value: Value, target: ValueKind) -> Option<Value> {
    let promoted = match (&value, target) {
        (Value::Bool(b), ValueKind::Int) => Value::Int(i64::from(*b)),
        (Value::Bool(b), ValueKind::Decimal) => Value::Decimal(if *b { 1.0 } else { 0.0 }),
        (Value::Int(n), ValueKind::Decimal) => Value::Decimal(*n as f64),
        (_, ValueKind::Str) => Value::string(value.to_string()),
        _ => return None,
    };
    Some(promoted)
}

#[cfg(test)]
mod tests;

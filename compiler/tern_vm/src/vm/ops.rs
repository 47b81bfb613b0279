//! Operator semantics: binary arithmetic, comparison and logic, and unary
//! operators.
//!
//! Operands of different kinds are unified with [`tern_value::coerce`]
//! first. Integer arithmetic is checked; decimals follow IEEE 754.

use std::cmp::Ordering;

use tern_bytecode::OpCode;
use tern_value::{coerce, Value};

use super::Result;
use crate::RuntimeErrorKind;

/// Source-level operator text, for error messages.
fn symbol(op: OpCode) -> &'static str {
    match op {
        OpCode::Add => "+",
        OpCode::Sub | OpCode::Negate => "-",
        OpCode::Mul => "*",
        OpCode::Div => "/",
        OpCode::Mod => "%",
        OpCode::BitAnd => "&",
        OpCode::BitOr => "|",
        OpCode::BitXor => "^",
        OpCode::Shl => "<<",
        OpCode::Shr => ">>",
        OpCode::Equal => "==",
        OpCode::NotEqual => "!=",
        OpCode::Greater => ">",
        OpCode::GreaterEqual => ">=",
        OpCode::Less => "<",
        OpCode::LessEqual => "<=",
        OpCode::And => "&&",
        OpCode::Or => "||",
        OpCode::Not => "!",
        OpCode::BitNot => "~",
        other => other.mnemonic(),
    }
}

pub(super) fn binary(op: OpCode, left: Value, right: Value) -> Result<Value> {
    match op {
        OpCode::And => return Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        OpCode::Or => return Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        _ => {}
    }

    let (left_kind, right_kind) = (left.kind(), right.kind());
    let unsupported = || RuntimeErrorKind::UnsupportedOperands {
        op: symbol(op),
        left: left_kind,
        right: right_kind,
    };

    let Some((left, right)) = coerce(left, right) else {
        // Values that cannot share a kind are never equal.
        return match op {
            OpCode::Equal => Ok(Value::Bool(false)),
            OpCode::NotEqual => Ok(Value::Bool(true)),
            _ => Err(unsupported()),
        };
    };

    match op {
        OpCode::Equal => return Ok(Value::Bool(left == right)),
        OpCode::NotEqual => return Ok(Value::Bool(left != right)),
        OpCode::Greater | OpCode::GreaterEqual | OpCode::Less | OpCode::LessEqual => {
            let ordering = compare(&left, &right).ok_or_else(unsupported)?;
            return Ok(Value::Bool(ordering.is_some_and(|ord| matches_ordering(op, ord))));
        }
        _ => {}
    }

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => int_arithmetic(op, a, b)?.ok_or_else(unsupported),
        (Value::Decimal(a), Value::Decimal(b)) => {
            decimal_arithmetic(op, a, b).ok_or_else(unsupported)
        }
        (Value::Str(a), Value::Str(b)) if op == OpCode::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(&a);
            joined.push_str(&b);
            Ok(Value::string(joined))
        }
        (Value::Bool(a), Value::Bool(b)) => match op {
            OpCode::BitAnd => Ok(Value::Bool(a & b)),
            OpCode::BitOr => Ok(Value::Bool(a | b)),
            OpCode::BitXor => Ok(Value::Bool(a ^ b)),
            _ => Err(unsupported()),
        },
        _ => Err(unsupported()),
    }
}

/// Ordering of two same-kind values. The outer `None` means the kind is
/// unordered; the inner one is an unordered pair of decimals (NaN).
fn compare(left: &Value, right: &Value) -> Option<Option<Ordering>> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(Some(a.cmp(b))),
        (Value::Decimal(a), Value::Decimal(b)) => Some(a.partial_cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(Some(a.as_str().cmp(b.as_str()))),
        _ => None,
    }
}

fn matches_ordering(op: OpCode, ordering: Ordering) -> bool {
    match op {
        OpCode::Greater => ordering == Ordering::Greater,
        OpCode::GreaterEqual => ordering != Ordering::Less,
        OpCode::Less => ordering == Ordering::Less,
        OpCode::LessEqual => ordering != Ordering::Greater,
        _ => false,
    }
}

/// `Ok(None)` when `op` is not an integer operator.
fn int_arithmetic(op: OpCode, a: i64, b: i64) -> Result<Option<Value>> {
    let overflow = || RuntimeErrorKind::IntegerOverflow { op: symbol(op) };
    let result = match op {
        OpCode::Add => a.checked_add(b).ok_or_else(overflow)?,
        OpCode::Sub => a.checked_sub(b).ok_or_else(overflow)?,
        OpCode::Mul => a.checked_mul(b).ok_or_else(overflow)?,
        OpCode::Div | OpCode::Mod if b == 0 => return Err(RuntimeErrorKind::DivisionByZero),
        OpCode::Div => a.checked_div(b).ok_or_else(overflow)?,
        OpCode::Mod => a.checked_rem(b).ok_or_else(overflow)?,
        OpCode::BitAnd => a & b,
        OpCode::BitOr => a | b,
        OpCode::BitXor => a ^ b,
        OpCode::Shl => u32::try_from(b)
            .ok()
            .and_then(|shift| a.checked_shl(shift))
            .ok_or_else(overflow)?,
        OpCode::Shr => u32::try_from(b)
            .ok()
            .and_then(|shift| a.checked_shr(shift))
            .ok_or_else(overflow)?,
        _ => return Ok(None),
    };
    Ok(Some(Value::Int(result)))
}

fn decimal_arithmetic(op: OpCode, a: f64, b: f64) -> Option<Value> {
    let result = match op {
        OpCode::Add => a + b,
        OpCode::Sub => a - b,
        OpCode::Mul => a * b,
        OpCode::Div => a / b,
        OpCode::Mod => a % b,
        _ => return None,
    };
    Some(Value::Decimal(result))
}

pub(super) fn unary(op: OpCode, operand: &Value) -> Result<Value> {
    let unsupported = || RuntimeErrorKind::UnsupportedOperand {
        op: symbol(op),
        operand: operand.kind(),
    };
    match (op, operand) {
        (OpCode::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (OpCode::Negate, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or(RuntimeErrorKind::IntegerOverflow { op: "-" }),
        (OpCode::Negate, Value::Decimal(d)) => Ok(Value::Decimal(-d)),
        (OpCode::BitNot, Value::Int(n)) => Ok(Value::Int(!n)),
        (OpCode::BitNot, Value::Bool(b)) => Ok(Value::Bool(!b)),
        _ => Err(unsupported()),
    }
}

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_push_pop_keeps_last_popped() {
    let mut stack = Stack::with_capacity(4);
    stack.push(Value::Int(1)).unwrap();
    stack.push(Value::Int(2)).unwrap();
    assert_eq!(stack.top(), Some(&Value::Int(2)));

    assert_eq!(stack.pop().unwrap(), Value::Int(2));
    assert_eq!(stack.last_popped(), &Value::Int(2));
    assert_eq!(stack.top(), Some(&Value::Int(1)));
    assert_eq!(stack.sp(), 1);
}

#[test]
fn test_last_popped_defaults_to_null() {
    let stack = Stack::with_capacity(2);
    assert_eq!(stack.last_popped(), &Value::Null);
    assert_eq!(stack.top(), None);
}

#[test]
fn test_overflow_at_capacity() {
    let mut stack = Stack::with_capacity(2);
    stack.push(Value::Null).unwrap();
    stack.push(Value::Null).unwrap();
    assert_eq!(
        stack.push(Value::Null),
        Err(RuntimeErrorKind::StackOverflow { capacity: 2 })
    );
}

#[test]
fn test_pop_empty_underflows() {
    let mut stack = Stack::with_capacity(2);
    assert_eq!(stack.pop(), Err(RuntimeErrorKind::StackUnderflow));
    assert_eq!(stack.discard(1), Err(RuntimeErrorKind::StackUnderflow));
    assert!(stack.window(1).is_err());
}

#[test]
fn test_window_and_peek() {
    let mut stack = Stack::with_capacity(8);
    for n in 1..=4 {
        stack.push(Value::Int(n)).unwrap();
    }
    assert_eq!(stack.window(2).unwrap(), &[Value::Int(3), Value::Int(4)]);
    assert_eq!(stack.peek(3).unwrap(), &Value::Int(1));
    assert!(stack.peek(4).is_err());
}

#[test]
fn test_reserve_clears_fresh_slots() {
    let mut stack = Stack::with_capacity(8);
    for n in 1..=4 {
        stack.push(Value::Int(n)).unwrap();
    }
    stack.truncate(1);
    stack.reserve_to(2, 4).unwrap();
    assert_eq!(
        stack.as_slice(),
        &[Value::Int(1), Value::Int(2), Value::Null, Value::Null]
    );
    assert_eq!(
        stack.reserve_to(4, 9),
        Err(RuntimeErrorKind::StackOverflow { capacity: 8 })
    );
}

#[test]
fn test_set_outside_live_region_fails() {
    let mut stack = Stack::with_capacity(4);
    stack.push(Value::Int(1)).unwrap();
    stack.set(0, Value::Int(5)).unwrap();
    assert_eq!(stack.get(0).unwrap(), &Value::Int(5));
    assert!(stack.set(1, Value::Null).is_err());
}

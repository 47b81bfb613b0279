use pretty_assertions::assert_eq;

use super::*;

fn ints(items: &[i64]) -> Value {
    Value::array(items.iter().copied().map(Value::Int).collect())
}

#[test]
fn test_display() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Decimal(1.0).to_string(), "1.0");
    assert_eq!(Value::string("hi").to_string(), "hi");
    assert_eq!(
        Value::array(vec![Value::Int(1), Value::string("a"), ints(&[2])]).to_string(),
        "[1, a, [2]]"
    );
    assert_eq!(Value::error("boom", None).to_string(), "ERROR: boom");
}

#[test]
fn test_truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Int(0).is_truthy());
    assert!(Value::string("").is_truthy());
    assert!(ints(&[]).is_truthy());
}

#[test]
fn test_hash_keys_distinguish_kinds() {
    let one = Value::Int(1).hash_key().unwrap();
    let one_str = Value::string("1").hash_key().unwrap();
    assert_ne!(one, one_str);
    assert_eq!(one.text, one_str.text);
    assert_eq!(ints(&[1]).hash_key(), None);
}

#[test]
fn test_hash_factory() {
    let hash = Value::hash([
        (Value::string("a"), Value::Int(1)),
        (Value::Int(2), Value::Bool(true)),
        (Value::string("a"), Value::Int(3)),
    ])
    .unwrap();
    let Value::Hash(map) = &hash else {
        panic!("expected hash");
    };
    assert_eq!(map.len(), 2);
    let key = Value::string("a").hash_key().unwrap();
    assert_eq!(map[&key].value, Value::Int(3));

    assert_eq!(
        Value::hash([(ints(&[1]), Value::Null)]),
        Err(ValueKind::Array)
    );
}

#[test]
fn test_deep_copy_breaks_sharing() {
    let inner = ints(&[1, 2]);
    let outer = Value::array(vec![inner.clone(), Value::Int(3)]);
    let copy = outer.deep_copy();
    assert_eq!(copy, outer);

    let (Value::Array(a), Value::Array(b)) = (&outer, &copy) else {
        panic!("expected arrays");
    };
    assert!(!Heap::ptr_eq(a, b));
    let (Value::Array(ia), Value::Array(ib)) = (&a[0], &b[0]) else {
        panic!("expected nested arrays");
    };
    assert!(!Heap::ptr_eq(ia, ib));
}

#[test]
fn test_type_names() {
    assert_eq!(Value::Int(1).type_name(), "int");
    assert_eq!(Value::Builtin(0).type_name(), "builtin");
    assert_eq!(Value::hash([]).unwrap().type_name(), "hash");
}

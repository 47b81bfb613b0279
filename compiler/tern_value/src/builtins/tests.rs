use pretty_assertions::assert_eq;

use super::*;

fn call(name: &str, args: &[Value]) -> Result<Value, String> {
    let registry = StandardBuiltins;
    let index = registry.index_of(name).unwrap();
    let f = registry.resolve(index).unwrap();
    f(args)
}

fn ints(items: &[i64]) -> Value {
    Value::array(items.iter().copied().map(Value::Int).collect())
}

#[test]
fn test_registry_lookup() {
    let registry = StandardBuiltins;
    assert!(registry.is_builtin("len"));
    assert!(!registry.is_builtin("print"));
    let idx = registry.index_of("push").unwrap();
    assert_eq!(registry.name_of(idx), Some("push"));
    assert!(registry.resolve(99).is_none());
    assert_eq!(registry.name_of(7), Some("error"));
    assert_eq!(registry.name_of(8), None);
}

#[test]
fn test_len() {
    assert_eq!(call("len", &[Value::string("héllo")]), Ok(Value::Int(5)));
    assert_eq!(call("len", &[ints(&[1, 2, 3])]), Ok(Value::Int(3)));
    assert_eq!(
        call("len", &[Value::Int(1)]),
        Err("argument to `len` not supported, got int".to_string())
    );
}

#[test]
fn test_arity_message_exact() {
    assert_eq!(
        call("len", &[Value::string("one"), Value::string("two")]),
        Err("wrong number of arguments. got=2, wanted=1".to_string())
    );
    assert_eq!(
        call("push", &[ints(&[])]),
        Err("wrong number of arguments. got=1, wanted=2".to_string())
    );
}

#[test]
fn test_array_helpers() {
    assert_eq!(call("first", &[ints(&[4, 5])]), Ok(Value::Int(4)));
    assert_eq!(call("last", &[ints(&[4, 5])]), Ok(Value::Int(5)));
    assert_eq!(call("rest", &[ints(&[4, 5, 6])]), Ok(ints(&[5, 6])));
    assert_eq!(call("rest", &[ints(&[])]), Ok(Value::Null));
    assert_eq!(call("first", &[ints(&[])]), Ok(Value::Null));
    assert_eq!(
        call("first", &[Value::Int(1)]),
        Err("argument to `first` must be array, got int".to_string())
    );
}

#[test]
fn test_push_leaves_input_untouched() {
    let original = ints(&[1]);
    let pushed = call("push", &[original.clone(), Value::Int(2)]).unwrap();
    assert_eq!(pushed, ints(&[1, 2]));
    assert_eq!(original, ints(&[1]));
}

#[test]
fn test_type_and_error() {
    assert_eq!(call("type", &[Value::Decimal(1.5)]), Ok(Value::string("decimal")));
    let err = call("error", &[Value::string("bad")]).unwrap();
    assert_eq!(err.to_string(), "ERROR: bad");
    assert_eq!(call("puts", &[]), Ok(Value::Null));
}

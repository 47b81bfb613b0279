use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

#[test]
fn test_promotions() {
    assert_eq!(
        coerce(Value::Int(1), Value::Decimal(2.5)),
        Some((Value::Decimal(1.0), Value::Decimal(2.5)))
    );
    assert_eq!(
        coerce(Value::Decimal(2.5), Value::Bool(true)),
        Some((Value::Decimal(2.5), Value::Decimal(1.0)))
    );
    assert_eq!(
        coerce(Value::Bool(false), Value::Int(7)),
        Some((Value::Int(0), Value::Int(7)))
    );
    assert_eq!(
        coerce(Value::string("n="), Value::Int(3)),
        Some((Value::string("n="), Value::string("3")))
    );
}

#[test]
fn test_unrankable_mismatch() {
    assert_eq!(coerce(Value::Null, Value::Int(1)), None);
    assert_eq!(coerce(Value::array(vec![]), Value::string("x")), None);
}

#[test]
fn test_same_kind_non_scalar_untouched() {
    let a = Value::array(vec![Value::Int(1)]);
    let b = Value::array(vec![]);
    assert_eq!(coerce(a.clone(), b.clone()), Some((a, b)));
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>()
            .prop_filter("NaN never equals itself", |d| !d.is_nan())
            .prop_map(Value::Decimal),
        "[a-z0-9]{0,8}".prop_map(Value::string),
    ]
}

fn same_kind_pair() -> impl Strategy<Value = (Value, Value)> {
    prop_oneof![
        (any::<bool>(), any::<bool>()).prop_map(|(a, b)| (Value::Bool(a), Value::Bool(b))),
        (any::<i64>(), any::<i64>()).prop_map(|(a, b)| (Value::Int(a), Value::Int(b))),
        (-1e9f64..1e9, -1e9f64..1e9).prop_map(|(a, b)| (Value::Decimal(a), Value::Decimal(b))),
        ("[a-z]{0,8}", "[a-z]{0,8}").prop_map(|(a, b)| (Value::string(a), Value::string(b))),
    ]
}

proptest! {
    #[test]
    fn coercing_same_kind_is_identity((a, b) in same_kind_pair()) {
        prop_assert_eq!(coerce(a.clone(), b.clone()), Some((a, b)));
    }

    #[test]
    fn coerced_scalars_share_a_kind(a in scalar(), b in scalar()) {
        let (x, y) = coerce(a.clone(), b.clone()).unwrap();
        prop_assert_eq!(x.kind(), y.kind());
        let higher = rank(a.kind()).max(rank(b.kind()));
        prop_assert_eq!(rank(x.kind()), higher);
    }
}

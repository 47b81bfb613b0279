use pretty_assertions::assert_eq;
use tern_bytecode::{Instructions, LineTable, OpCode};
use tern_diagnostic::ErrorCode;
use tern_ir::Span;
use tern_value::Value;

use super::*;

fn unit(name: &str) -> ObjectCode {
    let mut lines = LineTable::new();
    lines.push(0, Span::new(0, 1));
    ObjectCode {
        unit_name: name.to_string(),
        instructions: Instructions::from(vec![OpCode::Constant.as_byte(), 0, 0]),
        constants: vec![Value::Int(7)],
        lines,
    }
}

#[test]
fn test_single_unit_is_propagated() {
    let object = unit("main");
    let linked = link(vec![object.clone()]).unwrap();
    assert_eq!(linked.instructions, object.instructions);
    assert_eq!(linked.constants, object.constants);
    assert_eq!(linked.lines, object.lines);
}

#[test]
fn test_empty_input() {
    let err = link(Vec::new()).unwrap_err();
    assert_eq!(err, LinkError::Empty);
    assert_eq!(err.code(), ErrorCode::E5001);
}

#[test]
fn test_multiple_units_are_rejected() {
    let err = link(vec![unit("a"), unit("b")]).unwrap_err();
    assert_eq!(
        err,
        LinkError::MultipleUnits {
            count: 2,
            names: vec!["a".to_string(), "b".to_string()],
        }
    );
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E5002);
    assert_eq!(diag.notes, vec!["units: a, b".to_string()]);
}

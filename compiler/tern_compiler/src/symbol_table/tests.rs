use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn scope_of(table: &mut SymbolTable, name: &str) -> (SymbolScope, u16) {
    let symbol = table.resolve(name).unwrap();
    (symbol.scope, symbol.index)
}

#[test]
fn test_globals_are_dense_from_zero() {
    let mut table = SymbolTable::new();
    let a = table.define("a").unwrap();
    let b = table.define("b").unwrap();
    assert_eq!((a.scope, a.index), (SymbolScope::Global, 0));
    assert_eq!((b.scope, b.index), (SymbolScope::Global, 1));
    assert_eq!(a.mangled, "main::a");
    assert_eq!(table.num_globals(), 2);
}

#[test]
fn test_redefinition_in_same_context_is_idempotent() {
    let mut table = SymbolTable::new();
    let first = table.define("a").unwrap();
    let second = table.define("a").unwrap();
    assert_eq!(first, second);
    assert_eq!(table.num_globals(), 1);
}

#[test]
fn test_function_locals_and_mangling() {
    let mut table = SymbolTable::new();
    table.enter_function(None);
    assert_eq!(table.context_name(), "fn#1");
    let c = table.define("c").unwrap();
    assert_eq!((c.scope, c.index), (SymbolScope::Local, 0));
    assert_eq!(c.mangled, "main::fn#1::c");
    assert_eq!(c.depth, DepthId(1));

    table.enter_function(Some("adder"));
    assert_eq!(table.context_path(), "main::fn#1::fn#2:adder");
    let d = table.define("d").unwrap();
    assert_eq!((d.scope, d.index), (SymbolScope::Local, 0));
    assert_eq!(d.mangled, "main::fn#1::fn#2:adder::d");
}

#[test]
fn test_parameters_and_locals_share_slots() {
    let mut table = SymbolTable::new();
    table.enter_function(None);
    assert_eq!(table.define_parameter("a").unwrap().index, 0);
    assert_eq!(table.define_parameter("b").unwrap().index, 1);
    assert_eq!(table.define("c").unwrap().index, 2);
    let symbols = table.leave_function();
    assert_eq!(symbols.num_locals, 3);
    assert!(symbols.free.is_empty());
    assert_eq!(table.call_depth(), 1);
}

#[test]
fn test_enclosing_local_is_captured_once() {
    let mut table = SymbolTable::new();
    table.enter_function(None);
    let a = table.define("a").unwrap();
    table.enter_function(None);

    assert_eq!(scope_of(&mut table, "a"), (SymbolScope::Free, 0));
    assert_eq!(scope_of(&mut table, "a"), (SymbolScope::Free, 0));

    let inner = table.leave_function();
    assert_eq!(inner.free, vec![a]);
    // Back in the outer function, `a` is an ordinary local again.
    assert_eq!(scope_of(&mut table, "a"), (SymbolScope::Local, 0));
}

#[test]
fn test_globals_and_externals_are_never_captured() {
    let mut table = SymbolTable::new();
    table.define("g").unwrap();
    table.define_external("len", 0).unwrap();
    table.enter_function(None);
    table.enter_function(None);
    assert_eq!(scope_of(&mut table, "g"), (SymbolScope::Global, 0));
    assert_eq!(scope_of(&mut table, "len"), (SymbolScope::Extern, 0));
    assert!(table.leave_function().free.is_empty());
}

#[test]
fn test_capture_through_intermediate_function() {
    let mut table = SymbolTable::new();
    table.enter_function(None);
    let x = table.define("x").unwrap();
    table.enter_function(None);
    table.enter_function(None);

    assert_eq!(scope_of(&mut table, "x"), (SymbolScope::Free, 0));
    let innermost = table.leave_function();
    assert_eq!(innermost.free, vec![x.clone()]);

    // Loading the capture from the middle function captures it there too.
    assert_eq!(scope_of(&mut table, "x"), (SymbolScope::Free, 0));
    let middle = table.leave_function();
    assert_eq!(middle.free, vec![x]);
}

#[test]
fn test_define_reuses_visible_global_from_block() {
    let mut table = SymbolTable::new();
    let x = table.define("x").unwrap();
    table.enter_block(BlockKind::If);
    assert_eq!(table.context_name(), "if#1");
    assert_eq!(table.define("x").unwrap(), x);
    table.leave_block();
    assert_eq!(table.num_globals(), 1);
}

#[test]
fn test_block_symbols_go_out_of_scope() {
    let mut table = SymbolTable::new();
    table.enter_block(BlockKind::Loop);
    let i = table.define("i").unwrap();
    assert_eq!(i.scope, SymbolScope::Global);
    assert_eq!(i.mangled, "main::loop#1::i");
    table.leave_block();
    assert_eq!(
        table.resolve("i"),
        Err(SymbolError::Unresolved("i".to_string()))
    );
}

#[test]
fn test_block_inside_function_reuses_function_local() {
    let mut table = SymbolTable::new();
    table.enter_function(None);
    let x = table.define("x").unwrap();
    table.enter_block(BlockKind::Loop);
    assert_eq!(table.define("x").unwrap(), x);
    let y = table.define("y").unwrap();
    assert_eq!((y.scope, y.index), (SymbolScope::Local, 1));
    table.leave_block();
    assert_eq!(table.leave_function().num_locals, 2);
}

#[test]
fn test_define_shadows_enclosing_function_local() {
    let mut table = SymbolTable::new();
    table.enter_function(None);
    table.define("x").unwrap();
    table.enter_function(None);
    let inner = table.define("x").unwrap();
    assert_eq!((inner.scope, inner.index), (SymbolScope::Local, 0));
    assert_eq!(inner.depth, DepthId(2));
    assert!(table.leave_function().free.is_empty());
}

#[test]
fn test_function_name_resolves_to_self() {
    let mut table = SymbolTable::new();
    table.enter_function(Some("fact"));
    table.define_function_name("fact");
    assert_eq!(scope_of(&mut table, "fact").0, SymbolScope::Function);

    table.enter_function(None);
    assert_eq!(scope_of(&mut table, "fact"), (SymbolScope::Free, 0));
}

#[test]
fn test_let_shadows_builtin_at_top_level() {
    let mut table = SymbolTable::new();
    table.define_external("len", 0).unwrap();
    let len = table.define("len").unwrap();
    assert_eq!(len.scope, SymbolScope::Global);
    assert_eq!(scope_of(&mut table, "len").0, SymbolScope::Global);
}

#[test]
fn test_unresolved_message() {
    let mut table = SymbolTable::new();
    let err = table.resolve("nope").unwrap_err();
    assert_eq!(err.to_string(), "symbol not found: nope");
}

#[test]
fn test_global_index_overflow_is_rejected() {
    let mut table = SymbolTable::new();
    for i in 0..=MAX_SYMBOL_INDEX {
        table.define(&format!("g{i}")).unwrap();
    }
    let err = table.define("one_too_many").unwrap_err();
    assert_eq!(
        err,
        SymbolError::IndexOverflow {
            scope: SymbolScope::Global,
            name: "one_too_many".to_string(),
            index: 0x4000,
        }
    );
}

#[test]
fn test_external_index_overflow_is_rejected() {
    let mut table = SymbolTable::new();
    assert!(table.define_external("ok", 0x3FFF).is_ok());
    assert!(matches!(
        table.define_external("big", 0x4000),
        Err(SymbolError::IndexOverflow { .. })
    ));
}

#[test]
fn test_encoding_tags() {
    let mut table = SymbolTable::new();
    let global = table.define("g").unwrap();
    let external = table.define_external("len", 3).unwrap();
    table.enter_function(None);
    let local = table.define("l").unwrap();
    table.define("m").unwrap();
    table.enter_function(None);
    let free = table.resolve("m").unwrap();

    assert_eq!(global.encoded(), 0x0000);
    assert_eq!(external.encoded(), 0x4003);
    assert_eq!(local.encoded(), 0x8000);
    assert_eq!(free.encoded(), 0xC000);
}

fn storage_scope() -> impl Strategy<Value = SymbolScope> {
    prop_oneof![
        Just(SymbolScope::Global),
        Just(SymbolScope::Local),
        Just(SymbolScope::Extern),
        Just(SymbolScope::Free),
    ]
}

proptest! {
    #[test]
    fn encoding_round_trips(scope in storage_scope(), index in 0..=MAX_SYMBOL_INDEX) {
        let symbol = Symbol {
            scope,
            name: "x".to_string(),
            mangled: "main::x".to_string(),
            context: ContextId::MAIN,
            depth: DepthId::MAIN,
            index,
        };
        prop_assert_eq!(decode(symbol.encoded()), (scope, index));
    }
}

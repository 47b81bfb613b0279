use pretty_assertions::assert_eq;
use tern_diagnostic::ErrorCode;
use tern_ir::{BinaryOp, ExprKind, Span, StmtKind, UnaryOp};

use super::*;

fn parse_source(source: &str) -> ParseOutput {
    let lexed = tern_lexer::lex(source);
    assert!(!lexed.has_errors(), "lex errors: {:?}", lexed.errors);
    parse(&lexed.tokens)
}

fn parse_ok(source: &str) -> Program {
    let output = parse_source(source);
    assert!(!output.has_errors(), "parse errors: {:?}", output.errors);
    output.program
}

fn single_expr(source: &str) -> ExprKind {
    let program = parse_ok(source);
    assert_eq!(program.statements.len(), 1);
    match &program.statements[0].kind {
        StmtKind::Expr(expr) => expr.kind.clone(),
        other => panic!("expected expression statement, got {other:?}"),
    }
}

/// Render an expression with explicit parentheses to check grouping.
fn sexpr(kind: &ExprKind) -> String {
    match kind {
        ExprKind::Int(n) => n.to_string(),
        ExprKind::Ident(name) => name.clone(),
        ExprKind::Binary { op, left, right } => {
            format!("({} {op} {})", sexpr(&left.kind), sexpr(&right.kind))
        }
        ExprKind::Unary { op, operand } => format!("({op}{})", sexpr(&operand.kind)),
        ExprKind::Call { callee, args } => {
            let args: Vec<_> = args.iter().map(|a| sexpr(&a.kind)).collect();
            format!("{}({})", sexpr(&callee.kind), args.join(", "))
        }
        ExprKind::Index { target, index } => {
            format!("{}[{}]", sexpr(&target.kind), sexpr(&index.kind))
        }
        ExprKind::Assign { target, value } => {
            format!("({} = {})", sexpr(&target.kind), sexpr(&value.kind))
        }
        other => format!("{other:?}"),
    }
}

#[test]
fn test_precedence() {
    let cases = [
        ("1 + 2 * 3", "(1 + (2 * 3))"),
        ("1 - 2 - 3", "((1 - 2) - 3)"),
        ("2 ** 3 ** 2", "(2 ** (3 ** 2))"),
        ("a || b && c", "(a || (b && c))"),
        ("a | b ^ c & d", "(a | (b ^ (c & d)))"),
        ("a == b < c", "(a == (b < c))"),
        ("a < b << 1", "(a < (b << 1))"),
        ("-a * b", "((-a) * b)"),
        ("!f(x)[0]", "(!f(x)[0])"),
        ("a = b = 1 + 2", "(a = (b = (1 + 2)))"),
        ("(1 + 2) * 3", "((1 + 2) * 3)"),
    ];
    for (source, expected) in cases {
        assert_eq!(sexpr(&single_expr(source)), expected, "source: {source}");
    }
}

#[test]
fn test_let_function_literal() {
    let program = parse_ok("let add = fn(a, b) { a + b };");
    let StmtKind::Let { name, value } = &program.statements[0].kind else {
        panic!("expected let");
    };
    assert_eq!(name.name, "add");
    let ExprKind::Function(func) = &value.kind else {
        panic!("expected function literal");
    };
    assert_eq!(func.name, None);
    let params: Vec<_> = func.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(params, vec!["a", "b"]);
    assert_eq!(func.body.statements.len(), 1);
}

#[test]
fn test_if_else_if_chain() {
    let kind = single_expr("if (a) { 1 } else if (b) { 2 } else { 3 }");
    let ExprKind::If { alternative, .. } = kind else {
        panic!("expected if");
    };
    let alternative = alternative.unwrap();
    assert_eq!(alternative.statements.len(), 1);
    let StmtKind::Expr(nested) = &alternative.statements[0].kind else {
        panic!("expected nested if");
    };
    assert!(matches!(
        nested.kind,
        ExprKind::If {
            alternative: Some(_),
            ..
        }
    ));
}

#[test]
fn test_for_loop_clauses() {
    let program =
        parse_ok("for (let i = 0; i < 10; i = i + 1) { if (i == 5) { break; } sum = sum + i; };");
    assert_eq!(program.statements.len(), 1);
    let StmtKind::For {
        init,
        condition,
        update,
        body,
    } = &program.statements[0].kind
    else {
        panic!("expected for");
    };
    assert!(matches!(init.as_deref().map(|s| &s.kind), Some(StmtKind::Let { .. })));
    assert!(condition.is_some());
    assert!(update.is_some());
    assert_eq!(body.statements.len(), 2);
}

#[test]
fn test_for_loop_empty_clauses() {
    let program = parse_ok("for (;;) { break; }");
    let StmtKind::For {
        init,
        condition,
        update,
        ..
    } = &program.statements[0].kind
    else {
        panic!("expected for");
    };
    assert!(init.is_none() && condition.is_none() && update.is_none());
}

#[test]
fn test_while_break_continue_return() {
    let program = parse_ok("while (true) { continue; break; return; return 1 }");
    let StmtKind::While { body, .. } = &program.statements[0].kind else {
        panic!("expected while");
    };
    let kinds: Vec<_> = body.statements.iter().map(|s| s.kind.clone()).collect();
    assert_eq!(kinds[0], StmtKind::Continue);
    assert_eq!(kinds[1], StmtKind::Break);
    assert_eq!(kinds[2], StmtKind::Return(None));
    assert!(matches!(kinds[3], StmtKind::Return(Some(_))));
}

#[test]
fn test_array_hash_literals() {
    let ExprKind::Array(items) = single_expr("[1, 2, 3,]") else {
        panic!("expected array");
    };
    assert_eq!(items.len(), 3);

    let ExprKind::Hash(pairs) = single_expr(r#"{"a": 1, 2: [3]}"#) else {
        panic!("expected hash");
    };
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].0.kind, ExprKind::Str("a".to_string()));
}

#[test]
fn test_spans_cover_statement() {
    let program = parse_ok("let x = 1 + 2;\nputs(x);");
    assert_eq!(program.statements[0].span, Span::new(0, 14));
    assert_eq!(program.statements[1].span, Span::new(15, 23));
    let StmtKind::Expr(call) = &program.statements[1].kind else {
        panic!("expected call");
    };
    assert_eq!(call.span, Span::new(15, 22));
}

#[test]
fn test_unary_ops() {
    assert!(matches!(
        single_expr("~5"),
        ExprKind::Unary {
            op: UnaryOp::BitNot,
            ..
        }
    ));
    assert!(matches!(
        single_expr("a % b"),
        ExprKind::Binary {
            op: BinaryOp::Mod,
            ..
        }
    ));
}

#[test]
fn test_error_recovery_reports_each_statement() {
    let output = parse_source("let = 1;\nlet y = ;\nlet z = 3;");
    assert_eq!(output.errors.len(), 2);
    assert_eq!(output.errors[0].code(), ErrorCode::E1004);
    assert_eq!(output.errors[1].code(), ErrorCode::E1002);
    // The valid statement still parses.
    assert_eq!(output.program.statements.len(), 1);
}

#[test]
fn test_unclosed_delimiter() {
    let output = parse_source("puts(1, 2");
    assert_eq!(output.errors.len(), 1);
    let err = &output.errors[0];
    assert_eq!(err.code(), ErrorCode::E1003);
    assert_eq!(
        err.kind,
        ParseErrorKind::UnclosedDelimiter {
            delimiter: '(',
            opened_at: Span::new(4, 5),
        }
    );
}

#[test]
fn test_unexpected_token_message() {
    let output = parse_source("let x 5;");
    assert_eq!(output.errors[0].to_string(), "expected `=`, found integer `5`");
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let depth = 2_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert!(matches!(single_expr(&source), ExprKind::Int(1)));
}

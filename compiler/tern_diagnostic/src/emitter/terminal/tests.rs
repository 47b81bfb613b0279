use pretty_assertions::assert_eq;
use tern_ir::Span;

use super::*;
use crate::ErrorCode;

fn render(emitter: TerminalEmitter<Vec<u8>>, diagnostic: &Diagnostic) -> String {
    let mut emitter = emitter;
    emitter.emit(diagnostic);
    emitter.flush();
    String::from_utf8(emitter.into_inner()).unwrap()
}

fn plain() -> TerminalEmitter<Vec<u8>> {
    TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
}

#[test]
fn test_header_and_raw_span_without_source() {
    let diag = Diagnostic::error(ErrorCode::E3002)
        .with_message("unresolved symbol `y`")
        .with_label(Span::new(4, 5), "not found in this scope");

    let text = render(plain(), &diag);
    assert!(text.starts_with("error[E3002]: unresolved symbol `y`\n"));
    assert!(text.contains("  --> 4..5: not found in this scope"));
}

#[test]
fn test_source_excerpt_with_caret_underline() {
    let source = "let x = 1;\nputs(y);\n";
    let diag = Diagnostic::error(ErrorCode::E3002)
        .with_message("unresolved symbol `y`")
        .with_label(Span::new(16, 17), "not found in this scope");

    let text = render(plain().with_source("main.tn", source), &diag);
    let expected = "\
error[E3002]: unresolved symbol `y`
  --> main.tn:2:6
    |
  2 | puts(y);
    |      ^ not found in this scope

";
    assert_eq!(text, expected);
}

#[test]
fn test_secondary_label_uses_dashes() {
    let source = "let add = fn(a, b) { a + b };";
    let diag = Diagnostic::error(ErrorCode::E6002)
        .with_message("wrong number of arguments. got=1, wanted=2")
        .with_secondary_label(Span::new(10, 28), "defined here");

    let text = render(plain().with_source("f.tn", source), &diag);
    assert!(text.contains(&"-".repeat(18)));
    assert!(!text.contains('^'));
}

#[test]
fn test_notes_rendered() {
    let diag = Diagnostic::error(ErrorCode::E6013)
        .with_message("instruction budget exhausted")
        .with_note("raise the limit with --budget=N");
    let text = render(plain(), &diag);
    assert!(text.contains("  = note: raise the limit with --budget=N"));
}

#[test]
fn test_colors_follow_mode() {
    let diag = Diagnostic::error(ErrorCode::E1001).with_message("unexpected token");
    let colored = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    assert!(render(colored, &diag).contains("\x1b["));

    let auto_no_tty = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Auto, false);
    assert!(!render(auto_no_tty, &diag).contains("\x1b["));
}

#[test]
fn test_emit_summary() {
    let mut emitter = plain();
    emitter.emit_summary(2);
    emitter.emit_summary(1);
    emitter.emit_summary(0);
    let text = String::from_utf8(emitter.into_inner()).unwrap();
    assert_eq!(
        text,
        "error: aborting due to 2 previous errors\n\
         error: aborting due to previous error\n"
    );
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!(ColorMode::default(), ColorMode::Auto);
}

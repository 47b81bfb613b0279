//! End-to-end tests driving the `ternc` binary.

use std::path::PathBuf;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn ternc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ternc"))
        .args(args)
        .env_remove("TERN_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn ternc")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn eval(source: &str) -> String {
    let output = ternc(&["eval", source]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    stdout(&output).trim_end().to_string()
}

/// Write `source` to a fresh file; the directory lives as long as the guard.
fn source_file(source: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("main.tern");
    std::fs::write(&path, source).expect("failed to write source");
    (dir, path)
}

#[test]
fn test_eval_prints_final_value() {
    assert_eq!(eval("1 + 2"), "3");
}

#[test]
fn test_closure_adder() {
    assert_eq!(
        eval("let newAdder = fn(a, b) { fn(c) { a + b + c; }; }; let adder = newAdder(1, 2); adder(8);"),
        "11"
    );
}

#[test]
fn test_copy_on_assignment() {
    assert_eq!(
        eval("let i = [1, 2, 3, 4, 5]; let j = i; i[1] = 9; [i, j]"),
        "[[1, 9, 3, 4, 5], [1, 2, 3, 4, 5]]"
    );
}

#[test]
fn test_loops() {
    let body = |stmt: &str| {
        format!("let sum = 0; for (let i = 0; i < 10; i = i + 1) {{ if (i == 5) {{ {stmt} }} sum = sum + i; }}; sum;")
    };
    assert_eq!(eval(&body("break;")), "10");
    assert_eq!(eval(&body("continue;")), "40");
}

#[test]
fn test_run_file_output() {
    let (_dir, path) = source_file("let greet = fn(name) { \"hello \" + name };\nputs(greet(\"tern\"));\n");
    let output = ternc(&["run", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "hello tern\n");
}

#[test]
fn test_builtin_arity_error() {
    let output = ternc(&["eval", "len(\"one\", \"two\")"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("error[E6012]: wrong number of arguments. got=2, wanted=1"), "{err}");
    assert!(err.contains("^^^"), "{err}");
}

#[test]
fn test_runtime_error_points_at_source_line() {
    let (_dir, path) = source_file("let a = 1;\nlet b = a / 0;\n");
    let output = ternc(&["run", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("error[E6009]: division by zero"), "{err}");
    assert!(err.contains("main.tern:2:9"), "{err}");
    assert!(err.contains("let b = a / 0;"), "{err}");
}

#[test]
fn test_stack_overflow_option() {
    let output = ternc(&["eval", "--stack-size=4", "[1, 2, 3, 4, 5]"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("error[E6004]"), "{}", stderr(&output));
}

#[test]
fn test_frame_overflow_option() {
    let output = ternc(&["eval", "--max-frames=32", "let f = fn() { f() }; f();"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("error[E6005]: frame overflow: more than 32 nested calls"), "{err}");
}

#[test]
fn test_budget_option() {
    let output = ternc(&["eval", "--budget=50", "while (true) {}"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("instruction budget of 50 exhausted"));
}

#[test]
fn test_compile_errors_are_all_reported() {
    let output = ternc(&["eval", "a; b;"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("symbol not found: a"), "{err}");
    assert!(err.contains("symbol not found: b"), "{err}");
    assert!(err.contains("aborting due to 2 previous errors"), "{err}");
}

#[test]
fn test_disasm_listing() {
    let (_dir, path) = source_file("1 + 2");
    let output = ternc(&["disasm", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let listing = stdout(&output);
    let expected = format!(
        "== main ==\n0000:  CONSTANT               0\n0003:  CONSTANT               1\n0006:  {:<16}\n",
        "ADD"
    );
    assert!(listing.starts_with(&expected), "{listing}");
    assert!(listing.contains("== constants ==\n   0: 1\n   1: 2\n"), "{listing}");
}

#[test]
fn test_repl_keeps_definitions() {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(env!("CARGO_BIN_EXE_ternc"))
        .arg("repl")
        .env_remove("TERN_LOG")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn ternc");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"let a = 20;\nlet add = fn(x) { x + a };\nmissing\nadd(22)\n")
        .expect("failed to write input");
    let output = child.wait_with_output().expect("failed to wait");

    assert!(output.status.success());
    let lines: Vec<_> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines, vec!["20", "<closure add>", "42"]);
    assert!(stderr(&output).contains("symbol not found: missing"));
}

#[test]
fn test_explain() {
    let output = ternc(&["explain", "E6002"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "E6002: a function was called with the wrong number of arguments\n"
    );
}

#[test]
fn test_unknown_option() {
    let output = ternc(&["run", "--fast", "main.tern"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown option '--fast'"));
}

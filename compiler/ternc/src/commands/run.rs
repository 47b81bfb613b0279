//! The `run` and `eval` commands.

use tern_vm::VmConfig;

use super::{read_file, report};
use crate::pipeline::run_source;

/// Run a source file. Output comes only from the program itself.
pub fn run_file(path: &str, config: VmConfig) {
    let source = read_file(path);
    if let Err(diagnostics) = run_source(&source, config) {
        report(path, &source, &diagnostics);
        std::process::exit(1);
    }
}

/// Evaluate source given on the command line and print its value.
pub fn eval_source(source: &str, config: VmConfig) {
    match run_source(source, config) {
        Ok(value) => println!("{value}"),
        Err(diagnostics) => {
            report("<eval>", source, &diagnostics);
            std::process::exit(1);
        }
    }
}

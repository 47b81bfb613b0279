//! Command handlers for the `ternc` CLI.
//!
//! Shared helpers (`read_file`, option parsing, diagnostic reporting) live
//! in the module root.

use std::io::IsTerminal;

use tern_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use tern_diagnostic::Diagnostic;
use tern_vm::VmConfig;

mod debug;
mod disasm;
mod explain;
mod repl;
mod run;

pub use debug::{lex_file, parse_file};
pub use disasm::disasm_file;
pub use explain::explain_error;
pub use repl::run_repl;
pub use run::{eval_source, run_file};

/// Read a source file, exiting with a message when it cannot be read.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error: cannot read '{path}': {e}");
            std::process::exit(1);
        }
    }
}

/// Print diagnostics against `source` to stderr, with a summary line.
pub(crate) fn report(path: &str, source: &str, diagnostics: &[Diagnostic]) {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, is_tty).with_source(path, source);
    emitter.emit_all(diagnostics);
    emitter.emit_summary(diagnostics.len());
    emitter.flush();
}

/// VM limits given on the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub config: VmConfig,
    /// Positional arguments, in order.
    pub inputs: Vec<String>,
}

impl RunOptions {
    /// Parse `--stack-size=N`, `--max-frames=N`, `--budget=N` and
    /// positional arguments.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = RunOptions::default();
        for arg in args {
            if let Some(value) = arg.strip_prefix("--stack-size=") {
                options.config.stack_capacity = parse_number(arg, value)?;
            } else if let Some(value) = arg.strip_prefix("--max-frames=") {
                options.config.frame_capacity = parse_number(arg, value)?;
            } else if let Some(value) = arg.strip_prefix("--budget=") {
                options.config.instruction_budget = Some(parse_number(arg, value)?);
            } else if arg.starts_with("--") {
                return Err(format!("unknown option '{arg}'"));
            } else {
                options.inputs.push(arg.clone());
            }
        }
        Ok(options)
    }
}

fn parse_number<T: std::str::FromStr>(arg: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid number in '{arg}'"))
}

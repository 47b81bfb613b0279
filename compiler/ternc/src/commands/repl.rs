//! The interactive read-eval-print loop.

use std::io::{BufRead, IsTerminal, Write};

use tern_vm::VmConfig;

use super::report;
use crate::pipeline::{config_diagnostic, Session};

const PROMPT: &str = ">> ";

/// Read entries from stdin until end of input, printing each entry's value.
///
/// Definitions persist across entries. The prompt is only shown when
/// stdin is a terminal, so piped input produces values only.
pub fn run_repl(config: VmConfig) {
    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(err) => {
            report("<repl>", "", &[config_diagnostic(&err)]);
            std::process::exit(1);
        }
    };

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("{PROMPT}");
            let _ = std::io::stdout().flush();
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("error: cannot read input: {e}");
                std::process::exit(1);
            }
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }
        match session.eval(&line) {
            Ok(value) => println!("{value}"),
            Err(diagnostics) => report("<repl>", &line, &diagnostics),
        }
    }
}

//! The `disasm` command: compile a file and print its bytecode listing.

use super::{read_file, report};
use crate::pipeline::compile_source;

pub fn disasm_file(path: &str) {
    let source = read_file(path);
    match compile_source(&source) {
        Ok(bytecode) => print!("{bytecode}"),
        Err(diagnostics) => {
            report(path, &source, &diagnostics);
            std::process::exit(1);
        }
    }
}

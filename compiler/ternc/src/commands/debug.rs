//! Debug commands: `lex` and `parse` for inspecting the front end.

use super::{read_file, report};
use crate::pipeline::parse_source;

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let lexed = tern_lexer::lex(&content);

    println!("Tokens for '{}' ({} tokens):", path, lexed.tokens.len());
    for tok in &lexed.tokens {
        println!("  {:?} @ {}", tok.kind, tok.span);
    }

    if lexed.has_errors() {
        let diagnostics: Vec<_> = lexed
            .errors
            .iter()
            .map(tern_lexer::LexError::to_diagnostic)
            .collect();
        report(path, &content, &diagnostics);
        std::process::exit(1);
    }
}

/// Parse a file and display its statements.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    match parse_source(&content) {
        Ok(program) => {
            println!("Parse result for '{path}':");
            println!("  Statements: {}", program.statements.len());
            for stmt in &program.statements {
                println!();
                println!("{stmt:#?}");
            }
        }
        Err(diagnostics) => {
            report(path, &content, &diagnostics);
            std::process::exit(1);
        }
    }
}

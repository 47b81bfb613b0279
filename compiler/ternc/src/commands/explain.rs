//! The `explain` command: describe an error code.

use tern_diagnostic::ErrorCode;

pub fn explain_error(code_str: &str) {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX, where the first digit names the phase:");
        eprintln!("  E0 lexer, E1 parser, E3 compiler, E5 linker, E6 runtime, E9 internal");
        std::process::exit(1);
    };
    println!("{code}: {}", code.description());
}

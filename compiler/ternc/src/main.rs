//! Tern toolchain CLI.

use ternc::commands::{
    disasm_file, eval_source, explain_error, lex_file, parse_file, run_file, run_repl, RunOptions,
};

fn main() {
    ternc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    match command {
        "run" | "eval" | "repl" => {
            let options = match RunOptions::parse(&args[2..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("error: {message}");
                    std::process::exit(1);
                }
            };
            match (command, options.inputs.as_slice()) {
                ("repl", []) => run_repl(options.config),
                ("run", [path]) => run_file(path, options.config),
                ("eval", [source]) => eval_source(source, options.config),
                _ => {
                    eprintln!("Usage: ternc {command} {}", usage_operand(command));
                    std::process::exit(1);
                }
            }
        }
        "disasm" | "lex" | "parse" => {
            if args.len() != 3 {
                eprintln!("Usage: ternc {command} <file.tern>");
                std::process::exit(1);
            }
            match command {
                "disasm" => disasm_file(&args[2]),
                "lex" => lex_file(&args[2]),
                _ => parse_file(&args[2]),
            }
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: ternc explain <ERROR_CODE>");
                eprintln!("Example: ternc explain E6002");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("ternc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare path runs the file.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("tern"))
            {
                run_file(command, tern_vm::VmConfig::default());
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn usage_operand(command: &str) -> &'static str {
    match command {
        "run" => "<file.tern> [options]",
        "eval" => "'<source>' [options]",
        _ => "[options]",
    }
}

fn print_usage() {
    println!("Tern toolchain");
    println!();
    println!("Usage: ternc <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.tern>      Compile and run a program");
    println!("  eval '<source>'      Run source text and print its value");
    println!("  repl                 Start an interactive session");
    println!("  disasm <file.tern>   Print the compiled bytecode");
    println!("  lex <file.tern>      Tokenize and display tokens");
    println!("  parse <file.tern>    Parse and display the syntax tree");
    println!("  explain <code>       Describe an error code (e.g., E6002)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("VM options (run, eval, repl):");
    println!("  --stack-size=<n>     Operand stack slots (default: 2048)");
    println!("  --max-frames=<n>     Maximum call depth (default: 1024)");
    println!("  --budget=<n>         Stop after <n> instructions");
    println!();
    println!("Set TERN_LOG (or RUST_LOG) to enable tracing, e.g. TERN_LOG=tern_vm=trace");
}

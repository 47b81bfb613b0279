//! Source text to running program: lex, parse, compile, link, run.
//!
//! Each phase reports failures as [`Diagnostic`]s; a phase only runs when
//! every earlier phase succeeded.

use tern_compiler::{compile, link, ByteCode, CompileError, Compiler, CompilerState};
use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_lexer::LexError;
use tern_parse::ParseError;
use tern_ir::Program;
use tern_value::{StandardBuiltins, Value};
use tern_vm::{ConfigError, Vm, VmConfig};

/// Builtins every program can call.
pub static BUILTINS: StandardBuiltins = StandardBuiltins;

/// Name given to the single unit compiled from a source file.
pub const UNIT_NAME: &str = "main";

pub fn parse_source(source: &str) -> Result<Program, Vec<Diagnostic>> {
    let lexed = tern_lexer::lex(source);
    if lexed.has_errors() {
        return Err(lexed.errors.iter().map(LexError::to_diagnostic).collect());
    }
    let parsed = tern_parse::parse(&lexed.tokens);
    if parsed.has_errors() {
        return Err(parsed.errors.iter().map(ParseError::to_diagnostic).collect());
    }
    Ok(parsed.program)
}

pub fn compile_source(source: &str) -> Result<ByteCode, Vec<Diagnostic>> {
    let program = parse_source(source)?;
    let object = compile(&program, &BUILTINS, UNIT_NAME)
        .map_err(|errors| compile_diagnostics(&errors))?;
    link(vec![object]).map_err(|err| vec![err.to_diagnostic()])
}

/// Compile and run `source`, returning the value of its final expression.
pub fn run_source(source: &str, config: VmConfig) -> Result<Value, Vec<Diagnostic>> {
    let bytecode = compile_source(source)?;
    let mut vm = Vm::builder(bytecode, &BUILTINS)
        .config(config)
        .build()
        .map_err(|err| vec![config_diagnostic(&err)])?;
    vm.run().map_err(|err| vec![err.to_diagnostic()])?;
    tracing::debug!(executed = vm.executed(), "program finished");
    Ok(vm.last_popped().clone())
}

fn compile_diagnostics(errors: &[CompileError]) -> Vec<Diagnostic> {
    errors.iter().map(CompileError::to_diagnostic).collect()
}

/// Diagnostic for an unusable VM configuration.
pub fn config_diagnostic(err: &ConfigError) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9001).with_message(format!("invalid VM configuration: {err}"))
}

/// An interactive session: globals, symbols and constants survive from one
/// entry to the next.
pub struct Session {
    state: CompilerState,
    globals: Vec<Value>,
    config: VmConfig,
}

impl Session {
    pub fn new(config: VmConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Session {
            state: CompilerState::default(),
            globals: Vec::new(),
            config,
        })
    }

    /// Evaluate one entry. A failed compile leaves the session untouched;
    /// a runtime error keeps every global written before it.
    pub fn eval(&mut self, source: &str) -> Result<Value, Vec<Diagnostic>> {
        let program = parse_source(source)?;

        let mut compiler = Compiler::resume(self.state.clone(), &BUILTINS);
        let object = compiler
            .compile_program(&program, UNIT_NAME)
            .map_err(|errors| compile_diagnostics(&errors))?;
        self.state = compiler.into_state();
        let bytecode = link(vec![object]).map_err(|err| vec![err.to_diagnostic()])?;

        let mut vm = Vm::builder(bytecode, &BUILTINS)
            .config(self.config)
            .globals(std::mem::take(&mut self.globals))
            .build()
            .map_err(|err| vec![config_diagnostic(&err)])?;
        let outcome = vm.run();
        tracing::debug!(
            executed = vm.executed(),
            ok = outcome.is_ok(),
            "repl entry finished"
        );
        let result = vm.last_popped().clone();
        self.globals = vm.into_globals();

        outcome.map_err(|err| vec![err.to_diagnostic()])?;
        Ok(result)
    }
}

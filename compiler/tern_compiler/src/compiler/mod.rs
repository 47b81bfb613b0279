//! Single-pass bytecode generation.
//!
//! The compiler walks the AST once with one recursive `match` per node
//! kind. Each function body gets its own [`CompilationUnit`]; the
//! [`SymbolTable`] decides the storage class of every name as it is seen.
//!
//! Errors are fail-fast within a statement and collected across top-level
//! statements, so one run reports every broken statement. Unit and scope
//! stacks stay balanced on every error path.

mod expr;
mod stmt;

use tern_bytecode::OpCode;
use tern_ir::{Program, Span};
use tern_value::{BuiltinRegistry, Value};

use crate::symbol_table::{Symbol, SymbolError, SymbolScope, SymbolTable};
use crate::unit::{CompilationUnit, PLACEHOLDER};
use crate::{CompileError, CompileErrorKind, ObjectCode};

/// Largest constant pool the `CONSTANT` operand can address.
const MAX_CONSTANTS: usize = 1 << 16;

/// Compile `program` with `builtins` as the host function set.
pub fn compile(
    program: &Program,
    builtins: &dyn BuiltinRegistry,
    unit_name: &str,
) -> std::result::Result<ObjectCode, Vec<CompileError>> {
    Compiler::new(builtins).compile_program(program, unit_name)
}

/// Symbols and constants carried from one REPL entry to the next.
#[derive(Clone, Debug, Default)]
pub struct CompilerState {
    pub symbols: SymbolTable,
    pub constants: Vec<Value>,
}

pub struct Compiler<'b> {
    symbols: SymbolTable,
    constants: Vec<Value>,
    /// Innermost unit last; never empty while compiling.
    units: Vec<CompilationUnit>,
    builtins: &'b dyn BuiltinRegistry,
}

type Result<T = ()> = std::result::Result<T, CompileError>;

impl<'b> Compiler<'b> {
    pub fn new(builtins: &'b dyn BuiltinRegistry) -> Self {
        Self::resume(CompilerState::default(), builtins)
    }

    /// Continue a previous session: its globals stay resolvable and its
    /// constant indices stay valid.
    pub fn resume(state: CompilerState, builtins: &'b dyn BuiltinRegistry) -> Self {
        Compiler {
            symbols: state.symbols,
            constants: state.constants,
            units: vec![CompilationUnit::new()],
            builtins,
        }
    }

    pub fn into_state(self) -> CompilerState {
        CompilerState {
            symbols: self.symbols,
            constants: self.constants,
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    #[tracing::instrument(level = "debug", skip_all, fields(unit = unit_name))]
    pub fn compile_program(
        &mut self,
        program: &Program,
        unit_name: &str,
    ) -> std::result::Result<ObjectCode, Vec<CompileError>> {
        self.units = vec![CompilationUnit::new()];

        let mut errors = Vec::new();
        for stmt in &program.statements {
            if let Err(err) = self.compile_stmt(stmt) {
                tracing::debug!(%err, span = %err.span, "statement failed to compile");
                errors.push(err);
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        // The final expression statement is the program's value: it stays
        // on the stack for the VM to pop when it halts.
        if self.unit().last_is(OpCode::Pop) {
            self.unit().remove_last();
        }

        let (instructions, lines) = self.units.pop().unwrap_or_default().finish();
        self.units.push(CompilationUnit::new());
        tracing::debug!(
            bytes = instructions.len(),
            constants = self.constants.len(),
            globals = self.symbols.num_globals(),
            "compiled"
        );
        Ok(ObjectCode {
            unit_name: unit_name.to_string(),
            instructions,
            constants: self.constants.clone(),
            lines,
        })
    }

    // Emission helpers

    fn unit(&mut self) -> &mut CompilationUnit {
        if self.units.is_empty() {
            self.units.push(CompilationUnit::new());
        }
        let last = self.units.len() - 1;
        &mut self.units[last]
    }

    fn emit(&mut self, op: OpCode, operands: &[usize], span: Span) -> Result<usize> {
        self.unit()
            .emit(op, operands, span)
            .map_err(|kind| kind.at(span))
    }

    /// Run `compile` with `count` values of the enclosing expression already
    /// on the stack, so a `break` or `continue` inside it can drop them.
    fn holding(&mut self, count: usize, compile: impl FnOnce(&mut Self) -> Result) -> Result {
        self.unit().hold(count);
        let result = compile(self);
        self.unit().release(count);
        result
    }

    /// Emit a forward jump to be patched later.
    fn emit_jump(&mut self, op: OpCode, span: Span) -> Result<usize> {
        self.emit(op, &[PLACEHOLDER], span)
    }

    /// Emit a jump to an already known offset.
    fn emit_jump_to(&mut self, op: OpCode, target: usize, span: Span) -> Result<usize> {
        if u16::try_from(target).is_err() {
            return Err(CompileErrorKind::JumpOutOfRange { target }.at(span));
        }
        self.emit(op, &[target], span)
    }

    /// Point the jump at `position` to the next instruction.
    fn patch_jump_here(&mut self, position: usize, span: Span) -> Result {
        let here = self.unit().len();
        self.patch_jump(position, here, span)
    }

    fn patch_jump(&mut self, position: usize, target: usize, span: Span) -> Result {
        self.unit()
            .patch_jump(position, target)
            .map_err(|kind| kind.at(span))
    }

    fn add_constant(&mut self, value: Value, span: Span) -> Result<usize> {
        if self.constants.len() >= MAX_CONSTANTS {
            return Err(CompileErrorKind::ConstantPoolOverflow.at(span));
        }
        self.constants.push(value);
        Ok(self.constants.len() - 1)
    }

    fn emit_constant(&mut self, value: Value, span: Span) -> Result {
        let index = self.add_constant(value, span)?;
        self.emit(OpCode::Constant, &[index], span)?;
        Ok(())
    }

    // Symbols

    /// Resolve `name`, falling back to the builtin registry.
    fn resolve(&mut self, name: &str, span: Span) -> Result<Symbol> {
        match self.symbols.resolve(name) {
            Ok(symbol) => Ok(symbol),
            Err(SymbolError::Unresolved(missing)) => match self.builtins.index_of(name) {
                Some(index) => self
                    .symbols
                    .define_external(name, index)
                    .map_err(|err| CompileErrorKind::from(err).at(span)),
                None => Err(CompileErrorKind::from(SymbolError::Unresolved(missing)).at(span)),
            },
            Err(err) => Err(CompileErrorKind::from(err).at(span)),
        }
    }

    fn load_symbol(&mut self, symbol: &Symbol, span: Span) -> Result {
        match symbol.scope {
            SymbolScope::Function => self.emit(OpCode::CurrentClosure, &[], span)?,
            _ => self.emit(OpCode::Get, &[usize::from(symbol.encoded())], span)?,
        };
        Ok(())
    }

    fn store_symbol(&mut self, symbol: &Symbol, span: Span) -> Result {
        self.emit(OpCode::Set, &[usize::from(symbol.encoded())], span)?;
        Ok(())
    }
}

//! Statement and block compilation.

use tern_bytecode::OpCode;
use tern_ir::{Block, Expr, ExprKind, Ident, Span, Stmt, StmtKind};

use super::{Compiler, Result};
use crate::symbol_table::{BlockKind, Symbol};
use crate::CompileErrorKind;

impl Compiler<'_> {
    pub(super) fn compile_stmt(&mut self, stmt: &Stmt) -> Result {
        let span = stmt.span;
        match &stmt.kind {
            StmtKind::Let { name, value } => self.compile_let(name, value, span),
            StmtKind::Return(value) => {
                match value {
                    Some(value) => {
                        self.compile_expr(value)?;
                        self.emit(OpCode::ReturnValue, &[], span)?;
                    }
                    None => {
                        self.emit(OpCode::Return, &[], span)?;
                    }
                }
                Ok(())
            }
            StmtKind::Expr(expr) => {
                self.compile_expr(expr)?;
                self.emit(OpCode::Pop, &[], expr.span)?;
                Ok(())
            }
            StmtKind::While { condition, body } => self.compile_while(condition, body, span),
            StmtKind::For {
                init,
                condition,
                update,
                body,
            } => {
                self.symbols.enter_block(BlockKind::Loop);
                let result =
                    self.compile_for(init.as_deref(), condition.as_ref(), update.as_ref(), body, span);
                self.symbols.leave_block();
                result
            }
            StmtKind::Break => {
                let jump = self.emit_loop_exit(CompileErrorKind::BreakOutsideLoop, span)?;
                self.unit().add_break(jump);
                Ok(())
            }
            StmtKind::Continue => {
                let jump = self.emit_loop_exit(CompileErrorKind::ContinueOutsideLoop, span)?;
                self.unit().add_continue(jump);
                Ok(())
            }
        }
    }

    /// Pop whatever enclosing expressions left on the stack since the loop
    /// began, then emit the jump to be patched when the loop closes.
    fn emit_loop_exit(&mut self, outside: CompileErrorKind, span: Span) -> Result<usize> {
        let pops = self.unit().loop_exit_pops().ok_or_else(|| outside.at(span))?;
        for _ in 0..pops {
            self.emit(OpCode::Pop, &[], span)?;
        }
        self.emit_jump(OpCode::Jump, span)
    }

    /// Compile `block` in a fresh lexical context.
    pub(super) fn compile_block(&mut self, block: &Block, kind: BlockKind) -> Result {
        self.symbols.enter_block(kind);
        let result = self.compile_statements(&block.statements);
        self.symbols.leave_block();
        result
    }

    pub(super) fn compile_statements(&mut self, statements: &[Stmt]) -> Result {
        statements.iter().try_for_each(|stmt| self.compile_stmt(stmt))
    }

    /// A function literal sees its own binding, so a global function can
    /// call itself by name. Any other value is compiled before the name is
    /// defined and reads the outer `x` in `let x = x + 1`.
    fn compile_let(&mut self, name: &Ident, value: &Expr, span: Span) -> Result {
        let symbol = match &value.kind {
            ExprKind::Function(lit) => {
                let symbol = self.define(name)?;
                let binding = lit.name.is_none().then_some(name.name.as_str());
                self.compile_function(lit, binding, value.span)?;
                symbol
            }
            _ => {
                self.compile_expr(value)?;
                self.define(name)?
            }
        };
        self.store_symbol(&symbol, span)
    }

    fn define(&mut self, name: &Ident) -> Result<Symbol> {
        self.symbols
            .define(&name.name)
            .map_err(|err| CompileErrorKind::from(err).at(name.span))
    }

    fn compile_while(&mut self, condition: &Expr, body: &Block, span: Span) -> Result {
        let start = self.unit().len();
        self.compile_expr(condition)?;
        let exit = self.emit_jump(OpCode::JumpIfFalse, condition.span)?;

        self.unit().enter_loop();
        let body_result = self.compile_block(body, BlockKind::Loop);
        let jumps = self.unit().leave_loop();
        body_result?;

        self.emit_jump_to(OpCode::Jump, start, span)?;
        self.patch_jump_here(exit, span)?;
        let end = self.unit().len();
        for jump in jumps.breaks {
            self.patch_jump(jump, end, span)?;
        }
        for jump in jumps.continues {
            self.patch_jump(jump, start, span)?;
        }
        Ok(())
    }

    /// `continue` runs the update clause before the condition is rechecked.
    fn compile_for(
        &mut self,
        init: Option<&Stmt>,
        condition: Option<&Expr>,
        update: Option<&Expr>,
        body: &Block,
        span: Span,
    ) -> Result {
        if let Some(init) = init {
            self.compile_stmt(init)?;
        }

        let start = self.unit().len();
        let exit = match condition {
            Some(condition) => {
                self.compile_expr(condition)?;
                Some(self.emit_jump(OpCode::JumpIfFalse, condition.span)?)
            }
            None => None,
        };

        self.unit().enter_loop();
        let body_result = self.compile_statements(&body.statements);
        let jumps = self.unit().leave_loop();
        body_result?;

        let next = self.unit().len();
        if let Some(update) = update {
            self.compile_expr(update)?;
            self.emit(OpCode::Pop, &[], update.span)?;
        }
        self.emit_jump_to(OpCode::Jump, start, span)?;

        if let Some(exit) = exit {
            self.patch_jump_here(exit, span)?;
        }
        let end = self.unit().len();
        for jump in jumps.breaks {
            self.patch_jump(jump, end, span)?;
        }
        for jump in jumps.continues {
            self.patch_jump(jump, next, span)?;
        }
        Ok(())
    }
}

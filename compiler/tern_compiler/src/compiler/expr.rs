//! Expression compilation.

use tern_bytecode::OpCode;
use tern_ir::{BinaryOp, Block, Expr, ExprKind, FunctionLit, Span, UnaryOp};
use tern_stack::ensure_sufficient_stack;
use tern_value::{CompiledFunction, Value};

use super::{Compiler, Result};
use crate::symbol_table::{BlockKind, Symbol, SymbolScope};
use crate::unit::CompilationUnit;
use crate::CompileErrorKind;

impl Compiler<'_> {
    pub(super) fn compile_expr(&mut self, expr: &Expr) -> Result {
        ensure_sufficient_stack(|| self.compile_expr_inner(expr))
    }

    fn compile_expr_inner(&mut self, expr: &Expr) -> Result {
        let span = expr.span;
        match &expr.kind {
            ExprKind::Int(n) => self.emit_constant(Value::Int(*n), span),
            ExprKind::Decimal(d) => self.emit_constant(Value::Decimal(*d), span),
            ExprKind::Str(s) => self.emit_constant(Value::string(s.as_str()), span),
            ExprKind::Bool(b) => {
                let op = if *b { OpCode::True } else { OpCode::False };
                self.emit(op, &[], span)?;
                Ok(())
            }
            ExprKind::Null => {
                self.emit(OpCode::Null, &[], span)?;
                Ok(())
            }
            ExprKind::Ident(name) => {
                let symbol = self.resolve(name, span)?;
                self.load_symbol(&symbol, span)
            }
            ExprKind::Unary { op, operand } => {
                self.compile_expr(operand)?;
                let op = match op {
                    UnaryOp::Neg => OpCode::Negate,
                    UnaryOp::Not => OpCode::Not,
                    UnaryOp::BitNot => OpCode::BitNot,
                };
                self.emit(op, &[], span)?;
                Ok(())
            }
            ExprKind::Binary { op, left, right } => {
                let opcode = binary_opcode(*op)
                    .ok_or_else(|| CompileErrorKind::UnknownOperator(op.to_string()).at(span))?;
                self.compile_expr(left)?;
                self.holding(1, |this| this.compile_expr(right))?;
                self.emit(opcode, &[], span)?;
                Ok(())
            }
            ExprKind::If {
                condition,
                consequence,
                alternative,
            } => self.compile_if(condition, consequence, alternative.as_ref(), span),
            ExprKind::Function(lit) => self.compile_function(lit, None, span),
            ExprKind::Call { callee, args } => {
                self.compile_expr(callee)?;
                for (held, arg) in args.iter().enumerate() {
                    self.holding(held + 1, |this| this.compile_expr(arg))?;
                }
                self.emit(OpCode::Call, &[args.len()], span)?;
                Ok(())
            }
            ExprKind::Array(items) => {
                for (held, item) in items.iter().enumerate() {
                    self.holding(held, |this| this.compile_expr(item))?;
                }
                self.emit(OpCode::Array, &[items.len()], span)?;
                Ok(())
            }
            ExprKind::Hash(pairs) => {
                for (pair, (key, value)) in pairs.iter().enumerate() {
                    self.holding(pair * 2, |this| this.compile_expr(key))?;
                    self.holding(pair * 2 + 1, |this| this.compile_expr(value))?;
                }
                self.emit(OpCode::Hash, &[pairs.len() * 2], span)?;
                Ok(())
            }
            ExprKind::Index { target, index } => {
                self.compile_expr(target)?;
                self.holding(1, |this| this.compile_expr(index))?;
                self.emit(OpCode::Index, &[], span)?;
                Ok(())
            }
            ExprKind::Assign { target, value } => self.compile_assign(target, value, span),
        }
    }

    /// Both arms leave exactly one value; a missing arm yields `null`.
    fn compile_if(
        &mut self,
        condition: &Expr,
        consequence: &Block,
        alternative: Option<&Block>,
        span: Span,
    ) -> Result {
        self.compile_expr(condition)?;
        let skip_consequence = self.emit_jump(OpCode::JumpIfFalse, span)?;

        self.compile_branch(consequence)?;
        let skip_alternative = self.emit_jump(OpCode::Jump, span)?;

        self.patch_jump_here(skip_consequence, span)?;
        match alternative {
            Some(block) => self.compile_branch(block)?,
            None => {
                self.emit(OpCode::Null, &[], span)?;
            }
        }
        self.patch_jump_here(skip_alternative, span)
    }

    /// A branch's value is its trailing expression statement, kept on the
    /// stack by dropping that statement's `POP`.
    fn compile_branch(&mut self, block: &Block) -> Result {
        self.compile_block(block, BlockKind::If)?;
        if self.unit().last_is(OpCode::Pop) {
            self.unit().remove_last();
        } else {
            self.emit(OpCode::Null, &[], block.span)?;
        }
        Ok(())
    }

    /// Compile a function literal into a constant and emit the `CLOSURE`
    /// that instantiates it. `binding` names an anonymous literal after the
    /// `let` it is assigned to.
    pub(super) fn compile_function(
        &mut self,
        lit: &FunctionLit,
        binding: Option<&str>,
        span: Span,
    ) -> Result {
        let name = lit.name.as_deref().or(binding);

        self.symbols.enter_function(name);
        self.units.push(CompilationUnit::new());
        tracing::debug!(
            function = name.unwrap_or("<anonymous>"),
            context = %self.symbols.context_path(),
            "entering function unit"
        );

        let body = self.compile_function_body(lit, name);

        let unit = self.units.pop().unwrap_or_default();
        let symbols = self.symbols.leave_function();
        tracing::debug!(
            function = name.unwrap_or("<anonymous>"),
            locals = symbols.num_locals,
            free = symbols.free.len(),
            "leaving function unit"
        );
        body?;

        // Captured values go on the stack in capture order, loaded from
        // wherever they live in the enclosing scope.
        for captured in &symbols.free {
            let symbol = self.resolve(&captured.name, span)?;
            self.load_symbol(&symbol, span)?;
        }

        let num_params = u16::try_from(lit.params.len()).map_err(|_| {
            CompileErrorKind::TooManyOperands {
                op: OpCode::Closure,
                value: lit.params.len(),
            }
            .at(span)
        })?;
        let (instructions, lines) = unit.finish();
        let function = CompiledFunction {
            instructions,
            num_locals: symbols.num_locals,
            num_params,
            name: name.map(str::to_string),
            lines,
        };
        let index = self.add_constant(Value::function(function), span)?;
        self.emit(OpCode::Closure, &[index, symbols.free.len()], span)?;
        Ok(())
    }

    fn compile_function_body(&mut self, lit: &FunctionLit, name: Option<&str>) -> Result {
        if let Some(name) = name {
            self.symbols.define_function_name(name);
        }
        for param in &lit.params {
            self.symbols
                .define_parameter(&param.name)
                .map_err(|err| CompileErrorKind::from(err).at(param.span))?;
        }
        self.compile_statements(&lit.body.statements)?;

        // The last expression statement is the implicit return value.
        let unit = self.unit();
        if !unit.replace_last_pop_with_return()
            && !unit.last_is(OpCode::ReturnValue)
            && !unit.last_is(OpCode::Return)
        {
            self.emit(OpCode::Return, &[], lit.body.span)?;
        }
        Ok(())
    }

    fn compile_assign(&mut self, target: &Expr, value: &Expr, span: Span) -> Result {
        match &target.kind {
            ExprKind::Ident(name) => {
                let symbol = self.assignable(name, target.span)?;
                self.compile_expr(value)?;
                self.store_symbol(&symbol, span)?;
                self.load_symbol(&symbol, span)
            }
            ExprKind::Index {
                target: aggregate,
                index,
            } => {
                let ExprKind::Ident(name) = &aggregate.kind else {
                    return Err(CompileErrorKind::InvalidAssignment {
                        target: "a nested index".to_string(),
                    }
                    .at(aggregate.span));
                };
                let symbol = self.assignable(name, aggregate.span)?;
                self.compile_expr(index)?;
                self.holding(1, |this| this.compile_expr(value))?;
                self.emit(OpCode::SetAssign, &[usize::from(symbol.encoded())], span)?;
                Ok(())
            }
            _ => Err(CompileErrorKind::InvalidAssignment {
                target: "this expression".to_string(),
            }
            .at(target.span)),
        }
    }

    /// Resolve an assignment target; only globals and locals have a slot
    /// `SET` can write.
    fn assignable(&mut self, name: &str, span: Span) -> Result<Symbol> {
        let symbol = self.resolve(name, span)?;
        let what = match symbol.scope {
            SymbolScope::Global | SymbolScope::Local => return Ok(symbol),
            SymbolScope::Free => "captured variable",
            SymbolScope::Extern => "builtin",
            SymbolScope::Function => "function",
        };
        Err(CompileErrorKind::InvalidAssignment {
            target: format!("{what} `{name}`"),
        }
        .at(span))
    }
}

fn binary_opcode(op: BinaryOp) -> Option<OpCode> {
    let opcode = match op {
        BinaryOp::Add => OpCode::Add,
        BinaryOp::Sub => OpCode::Sub,
        BinaryOp::Mul => OpCode::Mul,
        BinaryOp::Div => OpCode::Div,
        BinaryOp::Mod => OpCode::Mod,
        BinaryOp::Eq => OpCode::Equal,
        BinaryOp::NotEq => OpCode::NotEqual,
        BinaryOp::Lt => OpCode::Less,
        BinaryOp::LtEq => OpCode::LessEqual,
        BinaryOp::Gt => OpCode::Greater,
        BinaryOp::GtEq => OpCode::GreaterEqual,
        BinaryOp::And => OpCode::And,
        BinaryOp::Or => OpCode::Or,
        BinaryOp::BitAnd => OpCode::BitAnd,
        BinaryOp::BitOr => OpCode::BitOr,
        BinaryOp::BitXor => OpCode::BitXor,
        BinaryOp::Shl => OpCode::Shl,
        BinaryOp::Shr => OpCode::Shr,
        BinaryOp::Pow => return None,
    };
    Some(opcode)
}

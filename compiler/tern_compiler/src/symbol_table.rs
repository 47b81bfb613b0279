//! Lexical scopes and symbol resolution.
//!
//! Two stacks move together while the compiler walks the tree:
//!
//! - the **context stack**: one entry per lexical scope (`main`, each
//!   function body, each `if` branch, each loop body). Contexts own the
//!   symbols defined in them and give every symbol its mangled name.
//! - the **call-depth stack**: one entry per function body. It owns the
//!   slot counter for locals and the list of captured free variables.
//!
//! A symbol found in an enclosing context that belongs to another call
//! depth cannot be read through the current frame, so [`SymbolTable::resolve`]
//! turns it into a `Free` capture of the current function.

use std::fmt;

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Largest raw index that fits beside the two scope tag bits.
pub const MAX_SYMBOL_INDEX: u16 = 0x3FFF;

const TAG_MASK: u16 = 0xC000;
const LOCAL_TAG: u16 = 0x8000;
const EXTERN_TAG: u16 = 0x4000;
const FREE_TAG: u16 = 0xC000;

/// Storage class of a resolved name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolScope {
    Global,
    Local,
    /// Host builtin, by registry index.
    Extern,
    /// Value captured by the closure being compiled.
    Free,
    /// The function's own name inside its body.
    Function,
}

impl SymbolScope {
    pub const fn as_str(self) -> &'static str {
        match self {
            SymbolScope::Global => "global",
            SymbolScope::Local => "local",
            SymbolScope::Extern => "extern",
            SymbolScope::Free => "free",
            SymbolScope::Function => "function",
        }
    }

    /// Whether `SET` may target this storage class.
    pub const fn is_assignable(self) -> bool {
        matches!(self, SymbolScope::Global | SymbolScope::Local)
    }
}

impl fmt::Display for SymbolScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a lexical context, unique within one table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ContextId(u32);

impl ContextId {
    pub const MAIN: ContextId = ContextId(0);

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Identifier of a function body (call depth), unique within one table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct DepthId(u32);

impl DepthId {
    pub const MAIN: DepthId = DepthId(0);

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// A resolved name. Never mutated after creation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Symbol {
    pub scope: SymbolScope,
    pub name: String,
    /// Context names joined by `::`, then the source name.
    pub mangled: String,
    pub context: ContextId,
    pub depth: DepthId,
    pub index: u16,
}

impl Symbol {
    /// Pack the scope into the top two bits of the operand.
    ///
    /// `Function` symbols are loaded with `CURRENT_CLOSURE` and never
    /// encoded; they fall back to the raw index.
    pub fn encoded(&self) -> u16 {
        let tag = match self.scope {
            SymbolScope::Global | SymbolScope::Function => 0,
            SymbolScope::Local => LOCAL_TAG,
            SymbolScope::Extern => EXTERN_TAG,
            SymbolScope::Free => FREE_TAG,
        };
        self.index | tag
    }
}

/// Split an encoded operand into its storage class and raw index.
pub fn decode(operand: u16) -> (SymbolScope, u16) {
    let index = operand & MAX_SYMBOL_INDEX;
    let scope = match operand & TAG_MASK {
        LOCAL_TAG => SymbolScope::Local,
        EXTERN_TAG => SymbolScope::Extern,
        FREE_TAG => SymbolScope::Free,
        _ => SymbolScope::Global,
    };
    (scope, index)
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SymbolError {
    #[error("symbol not found: {0}")]
    Unresolved(String),
    #[error("too many {scope} symbols: `{name}` would take slot {index}, the limit is 16384")]
    IndexOverflow {
        scope: SymbolScope,
        name: String,
        index: usize,
    },
}

/// Kind of block scope, used for the context's decorated name.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BlockKind {
    If,
    Loop,
}

#[derive(Clone, Debug)]
struct Context {
    id: ContextId,
    name: String,
    /// Source name to symbol.
    symbols: FxHashMap<String, Symbol>,
}

#[derive(Clone, Debug)]
struct FunctionScope {
    depth: DepthId,
    /// Position of the function's root context on the context stack.
    root: usize,
    num_locals: u16,
    free: Vec<Symbol>,
}

/// What a finished function body needs from the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSymbols {
    /// Local slots to reserve, parameters included.
    pub num_locals: u16,
    /// Captured symbols as seen from the enclosing scope, in capture order.
    pub free: Vec<Symbol>,
}

#[derive(Clone, Debug)]
pub struct SymbolTable {
    contexts: Vec<Context>,
    functions: Vec<FunctionScope>,
    next_id: u32,
    num_globals: u16,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            contexts: vec![Context {
                id: ContextId::MAIN,
                name: "main".to_string(),
                symbols: FxHashMap::default(),
            }],
            functions: vec![FunctionScope {
                depth: DepthId::MAIN,
                root: 0,
                num_locals: 0,
                free: Vec::new(),
            }],
            next_id: 1,
            num_globals: 0,
        }
    }

    /// Number of function bodies currently open, `main` included.
    pub fn call_depth(&self) -> usize {
        self.functions.len()
    }

    pub fn num_globals(&self) -> u16 {
        self.num_globals
    }

    /// Decorated name of the innermost context.
    pub fn context_name(&self) -> &str {
        self.current_context().name.as_str()
    }

    /// Full `::`-joined path of the active contexts.
    pub fn context_path(&self) -> String {
        self.path_through(self.contexts.len() - 1)
    }

    // Scope management

    /// Open a function body. Its context is named `fn#N`, or `fn#N:name`
    /// for a named function.
    pub fn enter_function(&mut self, name: Option<&str>) {
        let id = self.fresh_id();
        let context_name = match name {
            Some(name) => format!("fn#{}:{name}", id.0),
            None => format!("fn#{}", id.0),
        };
        self.functions.push(FunctionScope {
            depth: DepthId(id.0),
            root: self.contexts.len(),
            num_locals: 0,
            free: Vec::new(),
        });
        self.push_context(id, context_name);
    }

    /// Close the innermost function body, discarding any block contexts
    /// still open inside it.
    pub fn leave_function(&mut self) -> FunctionSymbols {
        // `main` is never popped.
        if self.functions.len() > 1 {
            if let Some(scope) = self.functions.pop() {
                self.contexts.truncate(scope.root);
                return FunctionSymbols {
                    num_locals: scope.num_locals,
                    free: scope.free,
                };
            }
        }
        FunctionSymbols {
            num_locals: 0,
            free: Vec::new(),
        }
    }

    pub fn enter_block(&mut self, kind: BlockKind) {
        let id = self.fresh_id();
        let name = match kind {
            BlockKind::If => format!("if#{}", id.0),
            BlockKind::Loop => format!("loop#{}", id.0),
        };
        self.push_context(id, name);
    }

    pub fn leave_block(&mut self) {
        let root = self.current_function().root;
        if self.contexts.len() > root + 1 {
            self.contexts.pop();
        }
    }

    // Definition

    /// Bind `name` for assignment.
    ///
    /// An assignable symbol already visible from here is reused: one in the
    /// current context, a global anywhere, or a local of the current
    /// function body. Anything else (a local of an enclosing function, a
    /// capture, a builtin, the function's own name) is shadowed by a fresh
    /// slot, since its storage is not addressable as a slot of this frame.
    pub fn define(&mut self, name: &str) -> Result<Symbol, SymbolError> {
        let depth = self.current_depth();
        if let Some(existing) = self.lookup(name) {
            let reusable = match existing.scope {
                SymbolScope::Global => true,
                SymbolScope::Local => existing.depth == depth,
                _ => false,
            };
            if reusable {
                return Ok(existing.clone());
            }
        }
        if self.functions.len() <= 1 {
            self.define_global(name)
        } else {
            self.define_local(name)
        }
    }

    /// Bind a parameter: always a fresh local in the current context.
    pub fn define_parameter(&mut self, name: &str) -> Result<Symbol, SymbolError> {
        self.define_local(name)
    }

    /// Bind the function's own name in its root context.
    pub fn define_function_name(&mut self, name: &str) -> Symbol {
        let scope = self.current_function();
        let (root, depth) = (scope.root, scope.depth);
        let symbol = Symbol {
            scope: SymbolScope::Function,
            name: name.to_string(),
            mangled: self.mangle(root, name),
            context: self.contexts[root].id,
            depth,
            index: 0,
        };
        self.contexts[root]
            .symbols
            .insert(name.to_string(), symbol.clone());
        symbol
    }

    /// Bind a host builtin at a fixed registry index in the `main` context.
    pub fn define_external(&mut self, name: &str, index: u32) -> Result<Symbol, SymbolError> {
        let index = u16::try_from(index)
            .ok()
            .filter(|i| *i <= MAX_SYMBOL_INDEX)
            .ok_or_else(|| SymbolError::IndexOverflow {
                scope: SymbolScope::Extern,
                name: name.to_string(),
                index: index as usize,
            })?;
        let symbol = Symbol {
            scope: SymbolScope::Extern,
            name: name.to_string(),
            mangled: self.mangle(0, name),
            context: ContextId::MAIN,
            depth: DepthId::MAIN,
            index,
        };
        self.contexts[0]
            .symbols
            .insert(name.to_string(), symbol.clone());
        Ok(symbol)
    }

    /// Capture `original` (a symbol of an enclosing function) as the next
    /// free variable of the current function.
    pub fn define_free(&mut self, original: Symbol) -> Result<Symbol, SymbolError> {
        let scope = self.current_function();
        let (root, depth) = (scope.root, scope.depth);
        let index = checked_index(scope.free.len(), SymbolScope::Free, &original.name)?;
        let symbol = Symbol {
            scope: SymbolScope::Free,
            name: original.name.clone(),
            mangled: self.mangle(root, &original.name),
            context: self.contexts[root].id,
            depth,
            index,
        };
        tracing::debug!(
            name = %original.name,
            from = %original.mangled,
            index,
            "capturing free variable"
        );
        self.contexts[root]
            .symbols
            .insert(symbol.name.clone(), symbol.clone());
        self.current_function_mut().free.push(original);
        Ok(symbol)
    }

    // Resolution

    /// Find `name`, innermost context first, capturing it when it lives in
    /// another function's frame.
    pub fn resolve(&mut self, name: &str) -> Result<Symbol, SymbolError> {
        let depth = self.current_depth();
        let found = self
            .lookup(name)
            .cloned()
            .ok_or_else(|| SymbolError::Unresolved(name.to_string()))?;
        match found.scope {
            SymbolScope::Global | SymbolScope::Extern => Ok(found),
            _ if found.depth == depth => Ok(found),
            _ => self.define_free(found),
        }
    }

    // Internals

    fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.contexts
            .iter()
            .rev()
            .find_map(|context| context.symbols.get(name))
    }

    fn define_global(&mut self, name: &str) -> Result<Symbol, SymbolError> {
        let index = checked_index(self.num_globals.into(), SymbolScope::Global, name)?;
        self.num_globals += 1;
        Ok(self.insert_current(SymbolScope::Global, name, index))
    }

    fn define_local(&mut self, name: &str) -> Result<Symbol, SymbolError> {
        let next = self.current_function().num_locals;
        let index = checked_index(next.into(), SymbolScope::Local, name)?;
        self.current_function_mut().num_locals += 1;
        Ok(self.insert_current(SymbolScope::Local, name, index))
    }

    fn insert_current(&mut self, scope: SymbolScope, name: &str, index: u16) -> Symbol {
        let at = self.contexts.len() - 1;
        let symbol = Symbol {
            scope,
            name: name.to_string(),
            mangled: self.mangle(at, name),
            context: self.contexts[at].id,
            depth: self.current_depth(),
            index,
        };
        self.contexts[at]
            .symbols
            .insert(name.to_string(), symbol.clone());
        symbol
    }

    fn mangle(&self, context: usize, name: &str) -> String {
        format!("{}::{name}", self.path_through(context))
    }

    fn path_through(&self, context: usize) -> String {
        self.contexts[..=context]
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join("::")
    }

    fn push_context(&mut self, id: ContextId, name: String) {
        self.contexts.push(Context {
            id,
            name,
            symbols: FxHashMap::default(),
        });
    }

    fn fresh_id(&mut self) -> ContextId {
        let id = ContextId(self.next_id);
        self.next_id += 1;
        id
    }

    fn current_context(&self) -> &Context {
        &self.contexts[self.contexts.len() - 1]
    }

    fn current_function(&self) -> &FunctionScope {
        &self.functions[self.functions.len() - 1]
    }

    fn current_function_mut(&mut self) -> &mut FunctionScope {
        let last = self.functions.len() - 1;
        &mut self.functions[last]
    }

    fn current_depth(&self) -> DepthId {
        self.current_function().depth
    }
}

fn checked_index(next: usize, scope: SymbolScope, name: &str) -> Result<u16, SymbolError> {
    u16::try_from(next)
        .ok()
        .filter(|i| *i <= MAX_SYMBOL_INDEX)
        .ok_or_else(|| SymbolError::IndexOverflow {
            scope,
            name: name.to_string(),
            index: next,
        })
}

#[cfg(test)]
mod tests;

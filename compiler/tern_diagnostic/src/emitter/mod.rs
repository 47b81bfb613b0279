//! Diagnostic emitters.
//!
//! Only human-readable terminal output is provided; every emitter
//! implements [`DiagnosticEmitter`] so the CLI stays format-agnostic.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Sink for rendered diagnostics.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Close a failed run with "aborting due to N previous errors".
    /// Writes nothing for a count of zero.
    fn emit_summary(&mut self, error_count: usize);
}

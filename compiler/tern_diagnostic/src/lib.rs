//! Diagnostic system for error reporting across the toolchain.
//!
//! Every phase reports failures as a [`Diagnostic`]:
//! - an [`ErrorCode`] whose leading digit names the phase
//! - a message (what went wrong)
//! - a primary span (where it went wrong)
//! - optional notes
//!
//! The [`emitter::TerminalEmitter`] echoes the offending source line and
//! underlines the primary span beneath it.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;

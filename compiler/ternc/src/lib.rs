//! The Tern toolchain.
//!
//! The `ternc` binary is a thin argument parser over [`commands`]; the
//! phases themselves are driven by [`pipeline`].

pub mod commands;
pub mod pipeline;
mod tracing_setup;

pub use tracing_setup::init_tracing;

//! Opt-in tracing output.

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical subscriber when `TERN_LOG` or `RUST_LOG` is set,
/// e.g. `TERN_LOG=tern_compiler=debug,tern_vm=trace`. Safe to call more
/// than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let Ok(directives) = std::env::var("TERN_LOG").or_else(|_| std::env::var("RUST_LOG"))
        else {
            return;
        };
        tracing_subscriber::registry()
            .with(EnvFilter::new(directives))
            .with(
                HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .init();
    });
}

//! Strux command line host.
//!
//! Renders JSON templates against JSON data and exposes the expression
//! evaluator for debugging. The binary in `main.rs` only parses arguments
//! and reports errors; the work lives in [`commands`].

use std::sync::Once;

pub mod commands;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=strux_template=debug` or `RUST_LOG=strux_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}

//! Log output setup.
//!
//! The library logs through the `log` facade; the subscriber installed here
//! also picks those records up.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging for the server.
///
/// `RUST_LOG` selects the level (default: info), e.g.
/// `RUST_LOG=press_dashboard_backend=debug`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Logging for tests: debug level, captured by the test harness.
/// Safe to call more than once.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

//! Logging setup.
//!
//! Installs a `tracing-subscriber` formatter. The level filter is read
//! from `RUST_LOG` (e.g. `RUST_LOG=smart_planning=debug`) and falls back
//! to the level given by the caller.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// Does nothing if a subscriber is already installed.
///
/// ```no_run
/// smart_planning::logging::init("info");
/// ```
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Installs a debug-level subscriber that writes through the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

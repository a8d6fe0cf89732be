//! Log initialisation for the command-line tool.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! binary's job.

use tracing_subscriber::{fmt, EnvFilter};

/// Maps the number of `-v` flags to a default filter directive.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs a stderr subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity` when set, e.g.
/// `RUST_LOG=factory_planner::resolver=debug`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Installs a debug-level subscriber that writes through the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

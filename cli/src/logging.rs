//! Diagnostic logging setup
//!
//! Progress lines meant for the user are printed directly; `tracing` events
//! carry the details (generated SQL, paths, connection target) and go to
//! stderr. `RUST_LOG` wins over the `-v` count.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

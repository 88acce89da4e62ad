//! Logging setup for the demo binary
//!
//! The library only emits `tracing` events; installing a subscriber is
//! left to whoever embeds it.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a stderr subscriber
///
/// `RUST_LOG` wins when set. Otherwise `quiet` selects error-only output
/// and the default is info-level events from this crate.
pub fn init_logging(quiet: bool) {
    let directive = if quiet { "winframe=error" } else { "winframe=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

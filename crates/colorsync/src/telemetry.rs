//! Tracing setup for binaries and tests that embed colorsync.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "colorsync=info";

/// Installs a global tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Store faults are logged at `error`
/// with their full detail at `debug`, so `colorsync=debug` shows everything.
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

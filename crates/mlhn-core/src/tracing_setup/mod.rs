//! Tracing setup: env-filtered subscriber and structured training events.

pub mod events;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::defaults;

static INIT: Once = Once::new();

/// Initialize the global subscriber.
///
/// Reads `MLHN_LOG` (e.g. `MLHN_LOG=mlhn=debug`), falling back to `mlhn=info`.
/// Idempotent, and a no-op if another subscriber is already installed.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(defaults::LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(defaults::DEFAULT_LOG_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

/// Initialize with JSON output and an explicit filter. Idempotent, and a
/// no-op if another subscriber is already installed.
pub fn init_tracing_json(filter: &str) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_target(true)
            .json()
            .try_init();
    });
}

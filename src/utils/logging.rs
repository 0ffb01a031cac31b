// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

// lopdf reports every unsupported font encoding at warn level; keep it quieter by default.
const DEFAULT_FILTER: &str = "info,lopdf=error";
const DEBUG_FILTER: &str = "party_extractor=debug,lopdf=warn";

/// Sets up tracing_subscriber output for the batch run.
/// `RUST_LOG` wins when present; otherwise `debug` picks a verbose crate-level filter.
pub fn setup_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug { DEBUG_FILTER } else { DEFAULT_FILTER })
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("Logging setup complete.");
}

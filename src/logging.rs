//! Set-up of the global tracing subscriber for the binaries.

use std::{fs::OpenOptions, path::Path, sync::Arc};

use tracing_subscriber::{
    EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// The filter used for terminal output when `RUST_LOG` is not set.
///
/// Command output goes to stdout, so only problems are logged to stderr by
/// default.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Install a subscriber that logs to stderr and, if `log_file` is given,
/// appends debug logs to that file.
///
/// The stderr output is filtered by the `RUST_LOG` environment variable,
/// falling back to [DEFAULT_LOG_FILTER].
///
/// # Errors
/// Returns an error if `log_file` cannot be opened for appending. No
/// subscriber is installed in that case.
///
/// # Panics
/// Panics if a global subscriber has already been installed.
pub fn setup_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        );

    let debug_log = match log_file {
        Some(path) => {
            let log_file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(log_file))
                    .with_filter(filter::LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(debug_log)
        .init();

    Ok(())
}

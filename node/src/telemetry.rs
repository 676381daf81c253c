//! Structured logging initialization via `tracing`.

use crate::config::LogFormat;

/// Initialize the tracing subscriber.
///
/// Respects the `RUST_LOG` environment variable for filtering. JSON output
/// is for deployments whose log pipeline wants machine-readable events.
pub fn init_tracing(format: LogFormat) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::from_default_env();
    match format {
        LogFormat::Plain => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}

//! Tracing subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "qflow_server=info,qflow_runner=info,tower_http=info";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable console output (for development).
    Console,
    /// JSON structured logging (for production).
    Json,
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_tracing(format: TracingFormat) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = match format {
        TracingFormat::Console => fmt::layer().with_target(true).boxed(),
        TracingFormat::Json => fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .json()
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(?format, "Tracing initialized");
    Ok(())
}

//! Logging and metrics bootstrap.
//!
//! Installs the process-wide `tracing` subscriber and, optionally, a
//! Prometheus exporter for the `metrics` facade used by the cache layer.

#[cfg(feature = "telemetry")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::DepublicResult;
use serde::{Deserialize, Serialize};

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for terminals.
    #[default]
    Pretty,
    /// One JSON object per line, for log shippers.
    Json,
}

/// Default directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,depublic=debug,sqlx=warn";

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over `level` when set. Calling this twice is an error,
/// as with any global subscriber.
#[cfg(feature = "telemetry")]
pub fn init_logging(level: &str, format: LogFormat) -> DepublicResult<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        let directive = if level.is_empty() {
            DEFAULT_FILTER.to_string()
        } else {
            format!("{},depublic=debug,sqlx=warn", level)
        };
        EnvFilter::try_new(directive)
    });
    let filter = filter
        .map_err(|e| crate::DepublicError::Configuration(format!("Invalid log filter: {}", e)))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
    };

    result.map_err(|e| crate::DepublicError::internal(format!("Failed to install subscriber: {}", e)))?;
    tracing::info!(format = ?format, "Logging initialized");
    Ok(())
}

/// Install a Prometheus recorder serving `/metrics` on `addr`.
#[cfg(feature = "telemetry")]
pub fn init_metrics_exporter(addr: std::net::SocketAddr) -> DepublicResult<()> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| crate::DepublicError::internal(format!("Failed to install metrics exporter: {}", e)))?;
    tracing::info!(%addr, "Prometheus exporter listening");
    Ok(())
}

/// Placeholder for when the telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_logging(_level: &str, _format: LogFormat) -> DepublicResult<()> {
    Ok(())
}

/// Placeholder for when the telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_metrics_exporter(_addr: std::net::SocketAddr) -> DepublicResult<()> {
    Ok(())
}

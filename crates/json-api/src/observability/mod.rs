//! Storefront telemetry: structured logs, request spans, OTLP traces and Prometheus metrics.

use thiserror::Error;

mod init;
mod logging;
mod metrics;
mod request;

pub(crate) use init::Observability;
pub(crate) use metrics::{metrics_handler, record_checkout_failure, record_order_placed};
pub(crate) use request::request_logging;

/// Telemetry could not be started.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    /// The OTLP span exporter rejected its configuration.
    #[error("failed to build OTLP exporter: {0}")]
    OtlpExporter(#[from] opentelemetry_otlp::ExporterBuildError),

    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

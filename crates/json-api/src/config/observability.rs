//! Logging and tracing settings for the storefront API.

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Tracing export and request logging settings.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Enable OpenTelemetry tracing export.
    #[arg(long, env = "OTEL_ENABLED", default_value_t = false)]
    pub otel_enabled: bool,

    /// Enable traceparent extraction from incoming request headers.
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    /// OTLP gRPC endpoint for trace export.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otel_exporter_otlp_endpoint: String,

    /// OTLP exporter timeout in seconds.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value_t = 3u64
    )]
    pub otel_exporter_otlp_timeout_seconds: u64,

    /// OpenTelemetry service name.
    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "farmgate-json")]
    pub otel_service_name: String,

    /// OpenTelemetry service version.
    #[arg(
        long,
        env = "OTEL_SERVICE_VERSION",
        default_value = env!("CARGO_PKG_VERSION")
    )]
    pub otel_service_version: String,

    /// OpenTelemetry deployment environment.
    #[arg(
        long,
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub otel_deployment_environment: String,

    /// Trace sampling ratio in range [0.0, 1.0].
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0_f64)]
    pub otel_trace_sample_ratio: f64,

    /// Requests slower than this are logged as `request.slow`.
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}

impl ObservabilityConfig {
    /// Incoming `traceparent` headers are honoured only while traces are exported.
    #[must_use]
    pub fn parent_propagation(&self) -> bool {
        self.otel_enabled && self.otel_parent_propagation_enabled
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        logging: LoggingConfig,

        #[command(flatten)]
        observability: ObservabilityConfig,
    }

    #[test]
    fn tracing_is_off_by_default() -> TestResult {
        let harness = Harness::try_parse_from(["farmgate-json"])?;

        assert!(!harness.observability.otel_enabled);
        assert!(!harness.observability.parent_propagation());
        assert_eq!(harness.observability.otel_service_name, "farmgate-json");

        Ok(())
    }

    #[test]
    fn parent_propagation_needs_export_enabled() -> TestResult {
        let without_export =
            Harness::try_parse_from(["farmgate-json", "--otel-parent-propagation-enabled"])?;

        assert!(!without_export.observability.parent_propagation());

        let with_export = Harness::try_parse_from([
            "farmgate-json",
            "--otel-enabled",
            "--otel-parent-propagation-enabled",
        ])?;

        assert!(with_export.observability.parent_propagation());

        Ok(())
    }

    #[test]
    fn json_log_format_is_accepted() -> TestResult {
        let harness = Harness::try_parse_from(["farmgate-json", "--log-format", "json"])?;

        assert!(matches!(harness.logging.log_format, LogFormat::Json));

        Ok(())
    }
}

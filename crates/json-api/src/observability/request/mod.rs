//! Per-request span, request ID, buyer tagging and HTTP metrics.

mod request_ids;
mod spans;

use std::{
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::Instant,
};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::Instrument as _;
use tracing::{Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use crate::{buyers::BUYER_HEADER, config::observability::ObservabilityConfig};

use self::request_ids::{REQUEST_ID_HEADER, RequestId};
use super::metrics;

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

static SLOW_REQUEST_THRESHOLD_MS: AtomicU64 = AtomicU64::new(1_000);
static HONOUR_REMOTE_PARENT: AtomicBool = AtomicBool::new(false);

/// Apply request logging settings; called once before the server starts.
pub(super) fn configure(config: &ObservabilityConfig) {
    SLOW_REQUEST_THRESHOLD_MS.store(config.slow_request_threshold_ms, Ordering::Relaxed);
    HONOUR_REMOTE_PARENT.store(config.parent_propagation(), Ordering::Relaxed);
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let _in_flight = metrics::InFlightRequestGuard::track();

    let request_id = RequestId::from_header(req.header::<String>(REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.as_str().to_owned());
    request_id.write_to(res);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let names = spans::request_span_name(&method, &path);

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %req.remote_addr(),
        buyer = tracing::field::Empty,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if HONOUR_REMOTE_PARENT.load(Ordering::Relaxed)
        && let Some(parent) = spans::remote_parent(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to attach remote parent to request span: {source}");
    }

    if let Some(buyer) = req.header::<String>(BUYER_HEADER) {
        span.record("buyer", buyer.as_str());
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);

    metrics::observe_request(&method, &names.otel_path, status.as_u16(), elapsed.as_secs_f64());

    log_completion(&span, status, elapsed.as_millis());
}

fn log_completion(span: &Span, status: StatusCode, duration_ms: u128) {
    let threshold_ms = u128::from(SLOW_REQUEST_THRESHOLD_MS.load(Ordering::Relaxed));

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        if status.is_server_error() {
            error!(status = status.as_u16(), duration_ms, "request.failed");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), duration_ms, "request.rejected");
        } else {
            info!(status = status.as_u16(), duration_ms, "request.completed");
        }

        if duration_ms > threshold_ms {
            warn!(duration_ms, threshold_ms, "request.slow");
        }
    });
}

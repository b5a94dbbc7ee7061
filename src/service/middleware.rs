//! Service middleware for request tracking and metric events.
//!
//! ## Metric events (`lexicon::metrics` target)
//!
//! - `request_metric` - path, method, status, latency per request
//! - `sample_metric` - category, count, latency per sample
//! - `auth_metric` - admission outcome per gated request
//!
//! Metrics are emitted as structured log events and can be aggregated from
//! the log stream.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};

/// Header echoing the request's trace id back to the caller.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id assigned to each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    fn from_request(request: &Request) -> Self {
        // Cloud Trace context looks like "TRACE_ID/SPAN_ID;o=1".
        let id = request
            .headers()
            .get("X-Cloud-Trace-Context")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split('/').next())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        Self(id)
    }
}

/// Request logging middleware that adds a correlation id and timing.
///
/// Only the path is logged. The query string may carry an access token
/// and never reaches the log.
pub async fn request_logging_middleware(mut request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = RequestId::from_request(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    request.extensions_mut().insert(request_id.clone());

    let span = info_span!(
        "request",
        trace_id = %request_id.0,
        method = %method,
        path = %path,
        status = tracing::field::Empty,
        latency_ms = tracing::field::Empty,
    );

    let mut response = next.run(request).instrument(span.clone()).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    span.record("status", status);
    span.record("latency_ms", latency_ms);

    if let Ok(value) = HeaderValue::from_str(&request_id.0) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    info!(
        target: "lexicon::metrics",
        metric_type = "request",
        trace_id = %request_id.0,
        path = %path,
        method = %method,
        status = status,
        latency_ms = latency_ms,
        "request_metric"
    );

    response
}

/// Record a completed sample.
pub fn record_sample_metrics(category: &str, count: usize, latency_us: u64) {
    info!(
        target: "lexicon::metrics",
        metric_type = "sample",
        category = category,
        count = count,
        latency_us = latency_us,
        "sample_metric"
    );
}

/// Record an authentication outcome.
///
/// `fingerprint` is the digest prefix of the presented token, never the
/// token itself.
pub fn record_auth_outcome(admitted: bool, reason: &str, fingerprint: Option<&str>) {
    let result = if admitted { "admitted" } else { "rejected" };
    info!(
        target: "lexicon::metrics",
        metric_type = "auth",
        result = result,
        reason = reason,
        token_fingerprint = fingerprint.unwrap_or("-"),
        "auth_metric"
    );
}

//! Request middleware: structured request logs and Prometheus metrics.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use super::metrics::{HttpLabels, HttpLabelsWithStatus, HttpMethod, Metrics};

/// Logs one line per request with method, path, status and elapsed time.
pub async fn trace_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "handled request"
    );
    response
}

/// Records the request counter, latency histogram and in-flight gauge.
/// The endpoint label is the matched route template, falling back to the raw
/// path for requests that matched no route.
pub async fn track_metrics(
    State(metrics): State<Arc<Metrics>>,
    request: Request,
    next: Next,
) -> Response {
    let method = HttpMethod::from(request.method());
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let start = Instant::now();

    metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    metrics.http_requests_in_flight.dec();

    metrics
        .http_request_duration_seconds
        .get_or_create(&HttpLabels {
            method: method.clone(),
            endpoint: endpoint.clone(),
        })
        .observe(start.elapsed().as_secs_f64());
    metrics
        .http_requests_total
        .get_or_create(&HttpLabelsWithStatus {
            method,
            endpoint,
            status: response.status().as_u16(),
        })
        .inc();

    response
}

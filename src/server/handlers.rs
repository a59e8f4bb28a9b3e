//! Route handlers for the HTTP API.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;

use super::error::ApiError;
use super::metrics::Metrics;
use super::request::IngestRequest;
use super::response::{IngestResponse, QueryResponse};
use crate::aggregate::aggregate;
use crate::clock::Clock;
use crate::log::EventLog;
use crate::reader::LogRead;

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub log: Arc<EventLog>,
    pub clock: Arc<dyn Clock>,
    pub metrics: Arc<Metrics>,
}

/// `POST /api/logs`: validates one inbound event and appends it.
pub async fn handle_ingest(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IngestResponse>, ApiError> {
    let record = match IngestRequest::from_body(&body).and_then(IngestRequest::into_record) {
        Ok(record) => record,
        Err(e) => {
            state.metrics.ingest_rejected_total.inc();
            return Err(e.into());
        }
    };

    state.log.append(&record).await?;
    state.metrics.records_ingested_total.inc();
    tracing::debug!(level = %record.level, url = %record.url, "record ingested");
    Ok(Json(IngestResponse::saved()))
}

/// `GET /api/logs`: every decodable record plus the derived aggregates.
pub async fn handle_query(State(state): State<AppState>) -> Result<Json<QueryResponse>, ApiError> {
    let records = state.log.records().await?;
    state.metrics.query_records_total.inc_by(records.len() as u64);

    let aggregates = aggregate(&records, state.clock.today_utc());
    Ok(Json(QueryResponse {
        logs: records,
        aggregates,
    }))
}

/// `GET /metrics`: Prometheus text exposition.
pub async fn handle_metrics(State(state): State<AppState>) -> String {
    state.metrics.encode()
}

/// `GET /-/healthy`: liveness probe.
pub async fn handle_healthy() -> &'static str {
    "OK"
}

/// `GET /-/ready`: readiness probe; exercises a full store read.
pub async fn handle_ready(State(state): State<AppState>) -> Result<&'static str, ApiError> {
    state.log.count().await?;
    Ok("OK")
}

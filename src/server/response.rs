//! Response payloads for the HTTP API.

use serde::Serialize;

use crate::aggregate::AggregateView;
use crate::model::LogRecord;

/// Body returned after a successful ingest.
#[derive(Debug, Clone, Serialize)]
pub struct IngestResponse {
    pub message: String,
}

impl IngestResponse {
    pub fn saved() -> IngestResponse {
        IngestResponse {
            message: "Log saved successfully".to_string(),
        }
    }
}

/// Body returned by the query endpoint: raw records plus the derived
/// aggregates, flattened to one JSON object.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub logs: Vec<LogRecord>,
    #[serde(flatten)]
    pub aggregates: AggregateView,
}

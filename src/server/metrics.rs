//! Prometheus metrics for the HTTP server.

use axum::http::Method;
use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::{EncodeLabelSet, EncodeLabelValue};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::metrics::histogram::{Histogram, exponential_buckets};
use prometheus_client::registry::Registry;

/// Labels for request counters, including the response status.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct HttpLabelsWithStatus {
    pub method: HttpMethod,
    pub endpoint: String,
    pub status: u16,
}

/// Labels for request latency histograms.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct HttpLabels {
    pub method: HttpMethod,
    pub endpoint: String,
}

/// HTTP method as a bounded label value.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum HttpMethod {
    Get,
    Post,
    Other,
}

impl From<&Method> for HttpMethod {
    fn from(method: &Method) -> Self {
        match *method {
            Method::GET => HttpMethod::Get,
            Method::POST => HttpMethod::Post,
            _ => HttpMethod::Other,
        }
    }
}

/// Container for every metric the server exposes.
pub struct Metrics {
    registry: Registry,
    pub http_requests_total: Family<HttpLabelsWithStatus, Counter>,
    pub http_request_duration_seconds: Family<HttpLabels, Histogram>,
    pub http_requests_in_flight: Gauge,
    pub records_ingested_total: Counter,
    pub ingest_rejected_total: Counter,
    pub query_records_total: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let http_requests_total = Family::<HttpLabelsWithStatus, Counter>::default();
        registry.register(
            "http_requests",
            "Total number of HTTP requests served",
            http_requests_total.clone(),
        );

        let http_request_duration_seconds =
            Family::<HttpLabels, Histogram>::new_with_constructor(|| {
                Histogram::new(exponential_buckets(0.001, 2.0, 14))
            });
        registry.register(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
            http_request_duration_seconds.clone(),
        );

        let http_requests_in_flight = Gauge::default();
        registry.register(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
            http_requests_in_flight.clone(),
        );

        let records_ingested_total = Counter::default();
        registry.register(
            "records_ingested",
            "Total number of log records appended to the store",
            records_ingested_total.clone(),
        );

        let ingest_rejected_total = Counter::default();
        registry.register(
            "ingest_rejected",
            "Total number of ingestion requests rejected by validation",
            ingest_rejected_total.clone(),
        );

        let query_records_total = Counter::default();
        registry.register(
            "query_records",
            "Total number of records returned by query requests",
            query_records_total.clone(),
        );

        Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            records_ingested_total,
            ingest_rejected_total,
            query_records_total,
        }
    }

    /// Mutable access to the registry, for callers registering extra metrics.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Renders the registry in Prometheus text exposition format.
    pub fn encode(&self) -> String {
        let mut buffer = String::new();
        encode(&mut buffer, &self.registry).expect("encoding metrics should not fail");
        buffer
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

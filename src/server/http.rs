//! HTTP server setup and lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tokio::net::TcpListener;

use super::config::LogServerConfig;
use super::handlers::{
    AppState, handle_healthy, handle_ingest, handle_metrics, handle_query, handle_ready,
};
use super::metrics::Metrics;
use super::middleware::{trace_requests, track_metrics};
use crate::clock::{Clock, SystemClock};
use crate::log::EventLog;

/// The logboard HTTP server.
///
/// # Example
///
/// ```ignore
/// let log = Arc::new(EventLog::open(Config::default()).await?);
/// LogServer::new(log, LogServerConfig::default()).run().await;
/// ```
pub struct LogServer {
    log: Arc<EventLog>,
    clock: Arc<dyn Clock>,
    config: LogServerConfig,
}

impl LogServer {
    pub fn new(log: Arc<EventLog>, config: LogServerConfig) -> LogServer {
        LogServer {
            log,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Serves requests until SIGINT or SIGTERM, then shuts down gracefully.
    pub async fn run(self) {
        let mut metrics = Metrics::new();
        self.log.register_metrics(metrics.registry_mut());
        let metrics = Arc::new(metrics);

        let state = AppState {
            log: self.log,
            clock: self.clock,
            metrics: metrics.clone(),
        };

        let app = Router::new()
            .route("/api/logs", post(handle_ingest).get(handle_query))
            .route("/metrics", get(handle_metrics))
            .route("/-/healthy", get(handle_healthy))
            .route("/-/ready", get(handle_ready))
            .layer(middleware::from_fn(trace_requests))
            .layer(middleware::from_fn_with_state(metrics, track_metrics))
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        tracing::info!("Starting HTTP server on {}", addr);

        let listener = TcpListener::bind(addr).await.unwrap();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .unwrap();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

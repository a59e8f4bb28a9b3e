//! HTTP layer: the ingestion and query endpoints plus service plumbing.

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod metrics;
pub mod middleware;
pub mod request;
pub mod response;

pub use config::{CliArgs, LogServerConfig};
pub use http::LogServer;

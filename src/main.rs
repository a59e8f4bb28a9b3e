use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use logboard::server::{CliArgs, LogServer, LogServerConfig};
use logboard::EventLog;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    let config = args.to_log_config();
    let server_config = LogServerConfig::from(&args);

    let log = EventLog::open(config).await.expect("Failed to open log");

    LogServer::new(Arc::new(log), server_config).run().await;
}

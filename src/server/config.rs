//! Server configuration and command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, DEFAULT_STORE_PATH};

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 3000;

/// Command-line arguments for the logboard server binary.
#[derive(Parser, Debug)]
#[command(
    name = "logboard",
    about = "Append-only log telemetry store with HTTP ingestion and aggregates"
)]
pub struct CliArgs {
    /// Path of the append-only store file.
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    pub store_path: PathBuf,

    /// Port the HTTP server listens on.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl CliArgs {
    /// Store configuration derived from the arguments.
    pub fn to_log_config(&self) -> Config {
        Config {
            path: self.store_path.clone(),
        }
    }
}

/// Settings for a [`LogServer`](super::LogServer).
#[derive(Debug, Clone)]
pub struct LogServerConfig {
    /// Port the HTTP server listens on.
    pub port: u16,
}

impl Default for LogServerConfig {
    fn default() -> Self {
        LogServerConfig { port: DEFAULT_PORT }
    }
}

impl From<&CliArgs> for LogServerConfig {
    fn from(args: &CliArgs) -> Self {
        LogServerConfig { port: args.port }
    }
}

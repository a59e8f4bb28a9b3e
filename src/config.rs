//! Configuration for opening a log store.

use std::path::PathBuf;

/// Store file used when no path is configured.
pub const DEFAULT_STORE_PATH: &str = "client-logs.txt";

/// Configuration for an [`EventLog`](crate::EventLog) or an
/// [`EventLogReader`](crate::EventLogReader).
///
/// # Example
///
/// ```ignore
/// let config = Config {
///     path: PathBuf::from("/var/log/app/client-logs.txt"),
/// };
/// let log = EventLog::open(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the append-only store file. The file is created on the
    /// first append; a missing file reads as an empty log.
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

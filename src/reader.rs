//! Read-side access to a log store.

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::line;
use crate::model::LogRecord;
use crate::storage::LineStoreRead;

/// Read operations shared by the full log handle and the read-only reader.
#[async_trait]
pub trait LogRead {
    /// Returns every stored line in append order.
    async fn lines(&self) -> Result<Vec<String>>;

    /// Returns every decodable record in append order. Lines matching no
    /// known shape are skipped with a warning, never an error.
    ///
    /// # Errors
    ///
    /// Fails only when the underlying file cannot be read; a missing file
    /// yields an empty result.
    async fn records(&self) -> Result<Vec<LogRecord>> {
        Ok(line::decode_lines(&self.lines().await?))
    }

    /// Returns the number of decodable records.
    async fn count(&self) -> Result<usize> {
        Ok(self.records().await?.len())
    }
}

/// Read-only handle over a store file.
///
/// For consumers that must not gain append access, such as an export job
/// running alongside a live server.
///
/// # Example
///
/// ```ignore
/// let reader = EventLogReader::open(Config::default()).await?;
/// for record in reader.records().await? {
///     println!("{} {}", record.timestamp, record.message);
/// }
/// ```
pub struct EventLogReader {
    store: LineStoreRead,
}

impl EventLogReader {
    /// Opens a reader over the configured store file. The file does not have
    /// to exist yet.
    ///
    /// # Errors
    ///
    /// Fails when the path exists but is not a readable regular file.
    pub async fn open(config: Config) -> Result<EventLogReader> {
        let store = LineStoreRead::new(config.path);
        store.check().await?;
        Ok(EventLogReader { store })
    }
}

#[async_trait]
impl LogRead for EventLogReader {
    async fn lines(&self) -> Result<Vec<String>> {
        self.store.read_lines().await
    }
}

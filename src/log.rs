//! The writable log handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::line;
use crate::model::LogRecord;
use crate::reader::LogRead;
use crate::storage::LineStore;

/// Live append counters, shared with any gauges registered for this log.
#[derive(Debug, Default)]
struct StoreStats {
    appended_records: AtomicI64,
    appended_bytes: AtomicI64,
}

/// An append-only event log backed by one line-oriented file.
///
/// Appends encode one record per line; reads decode the whole file back into
/// records, skipping lines that match no known shape. Reading is available
/// through [`LogRead`], which the log implements alongside the standalone
/// [`EventLogReader`](crate::EventLogReader).
///
/// # Example
///
/// ```ignore
/// let log = EventLog::open(Config::default()).await?;
/// log.append(&record).await?;
/// let records = log.records().await?;
/// ```
pub struct EventLog {
    store: LineStore,
    stats: Arc<StoreStats>,
}

impl EventLog {
    /// Opens the log at the configured path. The store file is created lazily
    /// on the first append, so the path does not have to exist yet.
    ///
    /// # Errors
    ///
    /// Fails when the path exists but is not a usable store file.
    pub async fn open(config: Config) -> Result<EventLog> {
        let store = LineStore::new(config.path);
        store.as_read().check().await?;
        Ok(EventLog {
            store,
            stats: Arc::new(StoreStats::default()),
        })
    }

    /// Encodes one record and appends it as a single store line.
    ///
    /// # Errors
    ///
    /// Fails when the underlying append fails; the record is not retried.
    pub async fn append(&self, record: &LogRecord) -> Result<()> {
        let line = line::encode(record);
        self.store.append_line(&line).await?;
        self.stats.appended_records.fetch_add(1, Ordering::Relaxed);
        // append_line terminates the line with '\n'
        self.stats
            .appended_bytes
            .fetch_add(line.len() as i64 + 1, Ordering::Relaxed);
        Ok(())
    }

    /// Registers store-level gauges with a Prometheus registry.
    ///
    /// The gauges read the live counters on each scrape, so registering once
    /// at server startup is enough.
    #[cfg(feature = "http-server")]
    pub fn register_metrics(&self, registry: &mut prometheus_client::registry::Registry) {
        registry.register(
            "store_appended_records",
            "Records appended to the store since it was opened",
            StoreStatGauge {
                stats: Arc::clone(&self.stats),
                read: |stats| stats.appended_records.load(Ordering::Relaxed),
            },
        );
        registry.register(
            "store_appended_bytes",
            "Bytes appended to the store since it was opened",
            StoreStatGauge {
                stats: Arc::clone(&self.stats),
                read: |stats| stats.appended_bytes.load(Ordering::Relaxed),
            },
        );
    }
}

/// Exposes one [`StoreStats`] counter as a Prometheus gauge, reading the live
/// atomic value on each scrape.
#[cfg(feature = "http-server")]
#[derive(Debug)]
struct StoreStatGauge {
    stats: Arc<StoreStats>,
    read: fn(&StoreStats) -> i64,
}

#[cfg(feature = "http-server")]
impl prometheus_client::encoding::EncodeMetric for StoreStatGauge {
    fn encode(
        &self,
        mut encoder: prometheus_client::encoding::MetricEncoder,
    ) -> std::result::Result<(), std::fmt::Error> {
        encoder.encode_gauge(&(self.read)(&self.stats))
    }

    fn metric_type(&self) -> prometheus_client::metrics::MetricType {
        prometheus_client::metrics::MetricType::Gauge
    }
}

#[async_trait]
impl LogRead for EventLog {
    async fn lines(&self) -> Result<Vec<String>> {
        self.store.as_read().read_lines().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{ANONYMOUS_USER, Level};

    fn record(level: Level, message: &str) -> LogRecord {
        LogRecord::new(
            "2024-01-01T00:00:00.000Z".to_string(),
            level,
            "/checkout".to_string(),
            message.to_string(),
            None,
        )
    }

    async fn open_temp_log() -> (tempfile::TempDir, EventLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::open(Config {
            path: dir.path().join("store.txt"),
        })
        .await
        .unwrap();
        (dir, log)
    }

    #[tokio::test]
    async fn should_append_and_read_back_the_same_record() {
        // given
        let (_dir, log) = open_temp_log().await;
        let record = record(Level::Error, "boom");

        // when
        log.append(&record).await.unwrap();

        // then
        let records = log.records().await.unwrap();
        assert_eq!(records.last(), Some(&record));
    }

    #[tokio::test]
    async fn should_read_empty_log_before_any_append() {
        // given
        let (_dir, log) = open_temp_log().await;

        // then
        assert!(log.records().await.unwrap().is_empty());
        assert_eq!(log.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn should_keep_appends_in_insertion_order() {
        // given
        let (_dir, log) = open_temp_log().await;

        // when
        log.append(&record(Level::Info, "first")).await.unwrap();
        log.append(&record(Level::Warn, "second")).await.unwrap();
        log.append(&record(Level::Error, "third")).await.unwrap();

        // then
        let messages: Vec<String> = log
            .records()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.message)
            .collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn should_store_multi_line_message_as_one_line() {
        // given
        let (_dir, log) = open_temp_log().await;
        let record = LogRecord {
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
            level: Level::Error,
            url: "/".to_string(),
            message: "stack trace\n  at main".to_string(),
            user_id: ANONYMOUS_USER.to_string(),
        };

        // when
        log.append(&record).await.unwrap();

        // then
        let lines = log.lines().await.unwrap();
        assert_eq!(lines.len(), 1);
        let stored = log.records().await.unwrap();
        assert_eq!(stored[0].message, "stack trace   at main");
    }

    #[tokio::test]
    async fn should_track_append_stats() {
        // given
        let (dir, log) = open_temp_log().await;

        // when
        log.append(&record(Level::Error, "boom")).await.unwrap();
        log.append(&record(Level::Info, "ok")).await.unwrap();

        // then
        let stored = tokio::fs::read_to_string(dir.path().join("store.txt"))
            .await
            .unwrap();
        assert_eq!(log.stats.appended_records.load(Ordering::Relaxed), 2);
        assert_eq!(
            log.stats.appended_bytes.load(Ordering::Relaxed),
            stored.len() as i64
        );
    }

    #[tokio::test]
    async fn should_not_count_failed_appends() {
        // given a directory at the store path, so every append fails
        let (dir, log) = open_temp_log().await;
        std::fs::create_dir(dir.path().join("store.txt")).unwrap();

        // when
        let result = log.append(&record(Level::Error, "boom")).await;

        // then
        assert!(result.is_err());
        assert_eq!(log.stats.appended_records.load(Ordering::Relaxed), 0);
        assert_eq!(log.stats.appended_bytes.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn should_survive_concurrent_appends() {
        // given
        let (_dir, log) = open_temp_log().await;
        let log = Arc::new(log);

        // when
        let mut handles = Vec::new();
        for i in 0..10 {
            let log = Arc::clone(&log);
            handles.push(tokio::spawn(async move {
                log.append(&record(Level::Info, &format!("message {}", i)))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // then
        assert_eq!(log.count().await.unwrap(), 10);
    }
}

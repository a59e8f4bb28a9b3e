//! Append-only log telemetry store with HTTP ingestion and dashboard
//! aggregates.
//!
//! Producers post structured log events; the store keeps one encoded line per
//! event in a flat file. Queries read the whole file back, decode each line
//! (skipping unparseable ones), and compute per-level, per-day and
//! client/server aggregates on the fly.
//!
//! # Architecture
//!
//! - `model`: record types ([`LogRecord`], [`Level`], [`Source`])
//! - `line`: the versioned line codec ([`encode`], [`decode`])
//! - `storage`: append and read roles over the store file
//! - `log` / `reader`: writable handle ([`EventLog`]) and read-only handle
//!   ([`EventLogReader`])
//! - `aggregate`: pure statistics over a decoded record set
//! - `path`: page-level helpers for dashboard consumers
//! - `server`: the axum HTTP layer (feature `http-server`)
//!
//! # Key Concepts
//!
//! - **Decode skip**: a stored line matching no known shape is dropped from
//!   reads with a warning; corrupt lines can never fail a query.
//! - **Versioned decoding**: every historical line shape is one ordered rule,
//!   so old store files keep decoding after format changes.
//! - **Derived aggregates**: nothing is cached; every query recomputes its
//!   view from the full record set against an injected clock.
//!
//! # Example
//!
//! ```ignore
//! use logboard::{aggregate, Clock, Config, EventLog, Level, LogRecord, LogRead, SystemClock};
//!
//! let log = EventLog::open(Config::default()).await?;
//! log.append(&LogRecord::new(
//!     "2024-01-01T00:00:00.000Z".to_string(),
//!     Level::Error,
//!     "/checkout".to_string(),
//!     "boom".to_string(),
//!     None,
//! ))
//! .await?;
//!
//! let records = log.records().await?;
//! let view = aggregate(&records, SystemClock.today_utc());
//! ```

mod aggregate;
mod clock;
mod config;
mod error;
mod line;
mod log;
mod model;
mod path;
mod reader;
mod storage;

#[cfg(feature = "http-server")]
pub mod server;

pub use aggregate::{AggregateView, DailySourceCount, aggregate, record_day};
pub use clock::{Clock, MockClock, SystemClock};
pub use config::{Config, DEFAULT_STORE_PATH};
pub use error::{Error, Result};
pub use line::{decode, encode};
pub use log::EventLog;
pub use model::{ANONYMOUS_USER, Level, LogRecord, Source};
pub use path::{LevelPageRow, PageCount, level_by_page, normalize_path, path_label, top_pages};
pub use reader::{EventLogReader, LogRead};

//! Aggregate statistics over a decoded record set.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Level, LogRecord, Source};

/// Derived statistics for one query, computed fresh from the full record set.
///
/// Nothing here is cached or stored; the view is fully determined by the
/// records and the `today` it was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateView {
    /// Record count per level; levels with no records are omitted.
    pub stats: BTreeMap<Level, u64>,
    /// Record count per UTC calendar day, ascending by day.
    pub daily_counts: BTreeMap<NaiveDate, u64>,
    /// Records whose day equals the current UTC day at aggregation time.
    pub today_count: u64,
    /// Client/server split per UTC calendar day, ascending by day.
    pub stacked_counts: Vec<DailySourceCount>,
}

/// One day's client/server record split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySourceCount {
    pub date: NaiveDate,
    pub client: u64,
    pub server: u64,
}

/// Computes the aggregate view for a record set.
///
/// Pure over its inputs: the same records and the same `today` always yield
/// the same view. Records whose timestamp does not parse as an ISO-8601
/// instant still count in `stats` but are left out of the day-based series.
pub fn aggregate(records: &[LogRecord], today: NaiveDate) -> AggregateView {
    let mut stats: BTreeMap<Level, u64> = BTreeMap::new();
    let mut daily_counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut source_split: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    let mut today_count = 0;

    for record in records {
        *stats.entry(record.level).or_default() += 1;

        let day = match record_day(&record.timestamp) {
            Some(day) => day,
            None => {
                tracing::warn!(
                    timestamp = %record.timestamp,
                    "record timestamp is not a valid instant"
                );
                continue;
            }
        };

        *daily_counts.entry(day).or_default() += 1;
        if day == today {
            today_count += 1;
        }
        let split = source_split.entry(day).or_default();
        match record.source() {
            Source::Client => split.0 += 1,
            Source::Server => split.1 += 1,
        }
    }

    let stacked_counts = source_split
        .into_iter()
        .map(|(date, (client, server))| DailySourceCount {
            date,
            client,
            server,
        })
        .collect();

    AggregateView {
        stats,
        daily_counts,
        today_count,
        stacked_counts,
    }
}

/// UTC calendar day of an ISO-8601 instant, if it parses.
pub fn record_day(timestamp: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|instant| instant.with_timezone(&Utc).date_naive())
}

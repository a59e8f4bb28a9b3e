//! Page-level helpers for dashboard consumers.
//!
//! These operate on the same decoded records as [`aggregate`](crate::aggregate)
//! but stay out of the query response; callers that want page rankings or a
//! per-page level breakdown compute them from the returned records.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::model::{Level, LogRecord};

static HOST_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^/]+").expect("host pattern must compile"));

/// Strips scheme and host from a URL and drops the query string. An empty
/// remainder collapses to `/`.
pub fn normalize_path(raw: &str) -> String {
    let path = HOST_PREFIX.replace(raw, "");
    let path = path.split('?').next().unwrap_or("");
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// Display label for a URL: `Home` for the root, an `API: ` prefix for api
/// paths, the normalized path otherwise.
pub fn path_label(raw: &str) -> String {
    let path = normalize_path(raw);
    if path == "/" {
        return "Home".to_string();
    }
    if path.starts_with("/api") {
        return format!("API: {}", path);
    }
    path
}

/// Record count for one normalized path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCount {
    pub path: String,
    pub count: u64,
}

/// The `limit` most active pages by normalized path, most active first.
/// Ties break by path so the ranking is stable.
pub fn top_pages(records: &[LogRecord], limit: usize) -> Vec<PageCount> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for record in records {
        *counts.entry(normalize_path(&record.url)).or_default() += 1;
    }

    let mut pages: Vec<PageCount> = counts
        .into_iter()
        .map(|(path, count)| PageCount { path, count })
        .collect();
    pages.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.path.cmp(&b.path)));
    pages.truncate(limit);
    pages
}

/// One heatmap row: per-page counts for a single level, aligned to the page
/// list the row was built against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelPageRow {
    pub level: Level,
    pub counts: Vec<u64>,
}

const HEAT_LEVELS: [Level; 3] = [Level::Info, Level::Warn, Level::Error];

/// Per-page counts for INFO, WARN and ERROR. Records match a page when their
/// display labels agree, the same comparison the dashboard uses.
pub fn level_by_page(records: &[LogRecord], pages: &[PageCount]) -> Vec<LevelPageRow> {
    HEAT_LEVELS
        .iter()
        .map(|&level| {
            let counts = pages
                .iter()
                .map(|page| {
                    let label = path_label(&page.path);
                    records
                        .iter()
                        .filter(|r| r.level == level && path_label(&r.url) == label)
                        .count() as u64
                })
                .collect();
            LevelPageRow { level, counts }
        })
        .collect()
}

//! Core data model for log telemetry records.

use serde::{Deserialize, Serialize};

/// Sentinel user identifier applied when a producer sends no `userId`.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Severity of a log record.
///
/// The set is closed. Producers may send any casing (`"error"`, `"Error"`),
/// which normalizes to the upper-case form for storage and for the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Log,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Parses a level name, ignoring case. Returns `None` for names outside
    /// the fixed set.
    pub fn parse(name: &str) -> Option<Level> {
        match name.to_ascii_uppercase().as_str() {
            "LOG" => Some(Level::Log),
            "INFO" => Some(Level::Info),
            "WARN" => Some(Level::Warn),
            "ERROR" => Some(Level::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Log => "LOG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record originated, derived from its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Client,
    Server,
}

impl Source {
    /// Classifies a URL: anything containing the `/api/` segment counts as
    /// server-side, everything else as client-side.
    pub fn of(url: &str) -> Source {
        if url.contains("/api/") {
            Source::Server
        } else {
            Source::Client
        }
    }
}

/// One structured log event.
///
/// The timestamp is the producer's capture time, carried verbatim as an
/// ISO-8601 string; the server never re-derives it.
///
/// # Example
///
/// ```
/// use logboard::{Level, LogRecord};
///
/// let record = LogRecord::new(
///     "2024-01-01T00:00:00.000Z".to_string(),
///     Level::Error,
///     "/checkout".to_string(),
///     "boom".to_string(),
///     None,
/// );
/// assert_eq!(record.user_id, "anonymous");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub timestamp: String,
    pub level: Level,
    pub url: String,
    pub message: String,
    pub user_id: String,
}

impl LogRecord {
    /// Builds a normalized record: newlines in the message are replaced so
    /// the record stays one line in the store, and a missing or empty user
    /// falls back to [`ANONYMOUS_USER`].
    pub fn new(
        timestamp: String,
        level: Level,
        url: String,
        message: String,
        user_id: Option<String>,
    ) -> LogRecord {
        LogRecord {
            timestamp,
            level,
            url,
            message: sanitize_message(&message),
            user_id: user_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| ANONYMOUS_USER.to_string()),
        }
    }

    pub fn source(&self) -> Source {
        Source::of(&self.url)
    }
}

/// Replaces line breaks with spaces so a message cannot span store lines.
pub(crate) fn sanitize_message(message: &str) -> String {
    message.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_levels_case_insensitively() {
        // given / when / then
        assert_eq!(Level::parse("error"), Some(Level::Error));
        assert_eq!(Level::parse("Error"), Some(Level::Error));
        assert_eq!(Level::parse("WARN"), Some(Level::Warn));
        assert_eq!(Level::parse("log"), Some(Level::Log));
        assert_eq!(Level::parse("info"), Some(Level::Info));
    }

    #[test]
    fn should_reject_levels_outside_the_fixed_set() {
        assert_eq!(Level::parse("DEBUG"), None);
        assert_eq!(Level::parse(""), None);
        assert_eq!(Level::parse("ERR OR"), None);
    }

    #[test]
    fn should_classify_api_urls_as_server() {
        assert_eq!(Source::of("/api/logs"), Source::Server);
        assert_eq!(Source::of("http://localhost:3000/api/checkout"), Source::Server);
    }

    #[test]
    fn should_classify_other_urls_as_client() {
        assert_eq!(Source::of("/"), Source::Client);
        assert_eq!(Source::of("/checkout"), Source::Client);
        // no trailing slash, so not an api segment
        assert_eq!(Source::of("/api"), Source::Client);
    }

    #[test]
    fn should_default_missing_user_to_anonymous() {
        // given
        let record = LogRecord::new(
            "2024-01-01T00:00:00.000Z".to_string(),
            Level::Info,
            "/".to_string(),
            "hello".to_string(),
            None,
        );

        // then
        assert_eq!(record.user_id, ANONYMOUS_USER);
    }

    #[test]
    fn should_treat_empty_user_as_anonymous() {
        // given
        let record = LogRecord::new(
            "2024-01-01T00:00:00.000Z".to_string(),
            Level::Info,
            "/".to_string(),
            "hello".to_string(),
            Some(String::new()),
        );

        // then
        assert_eq!(record.user_id, ANONYMOUS_USER);
    }

    #[test]
    fn should_replace_newlines_in_message() {
        // given
        let record = LogRecord::new(
            "2024-01-01T00:00:00.000Z".to_string(),
            Level::Warn,
            "/".to_string(),
            "line one\nline two\r\nline three".to_string(),
            Some("u-1".to_string()),
        );

        // then
        assert_eq!(record.message, "line one line two line three");
    }

    #[test]
    fn should_serialize_user_id_in_camel_case() {
        // given
        let record = LogRecord::new(
            "2024-01-01T00:00:00.000Z".to_string(),
            Level::Error,
            "/checkout".to_string(),
            "boom".to_string(),
            Some("u-1".to_string()),
        );

        // when
        let json = serde_json::to_value(&record).unwrap();

        // then
        assert_eq!(json["userId"], "u-1");
        assert_eq!(json["level"], "ERROR");
    }
}

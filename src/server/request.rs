//! Request payloads for the HTTP API.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Level, LogRecord};

/// Error message for any missing required field, fixed by the ingestion
/// contract.
const MISSING_LOG_DATA: &str = "Missing log data";

/// One inbound log event. Every field is optional until validated so a
/// missing field surfaces as a contract error instead of a parse failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    pub level: Option<String>,
    pub message: Option<String>,
    pub timestamp: Option<String>,
    pub url: Option<String>,
    pub user_id: Option<String>,
}

impl IngestRequest {
    /// Parses a raw JSON request body.
    pub fn from_body(body: &[u8]) -> Result<IngestRequest> {
        serde_json::from_slice(body)
            .map_err(|e| Error::InvalidInput(format!("Invalid JSON: {}", e)))
    }

    /// Validates the required fields and builds the normalized record.
    ///
    /// # Errors
    ///
    /// Fails when `timestamp`, `level`, `url` or `message` is missing, or
    /// when the level is outside the fixed set.
    pub fn into_record(self) -> Result<LogRecord> {
        let timestamp = self.timestamp.ok_or_else(missing_field)?;
        let level = self.level.ok_or_else(missing_field)?;
        let url = self.url.ok_or_else(missing_field)?;
        let message = self.message.ok_or_else(missing_field)?;

        let level = Level::parse(&level)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown level: {}", level)))?;

        Ok(LogRecord::new(timestamp, level, url, message, self.user_id))
    }
}

fn missing_field() -> Error {
    Error::InvalidInput(MISSING_LOG_DATA.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ANONYMOUS_USER;

    fn full_payload() -> serde_json::Value {
        serde_json::json!({
            "level": "error",
            "message": "boom",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "url": "/checkout",
            "userId": "u-1",
        })
    }

    fn parse(payload: serde_json::Value) -> Result<LogRecord> {
        IngestRequest::from_body(payload.to_string().as_bytes())
            .and_then(IngestRequest::into_record)
    }

    #[test]
    fn should_build_record_from_full_payload() {
        // when
        let record = parse(full_payload()).unwrap();

        // then
        assert_eq!(record.timestamp, "2024-01-01T00:00:00.000Z");
        assert_eq!(record.level, Level::Error);
        assert_eq!(record.url, "/checkout");
        assert_eq!(record.message, "boom");
        assert_eq!(record.user_id, "u-1");
    }

    #[test]
    fn should_default_user_when_absent() {
        // given
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("userId");

        // when
        let record = parse(payload).unwrap();

        // then
        assert_eq!(record.user_id, ANONYMOUS_USER);
    }

    #[test]
    fn should_reject_missing_required_fields() {
        for field in ["level", "message", "timestamp", "url"] {
            // given
            let mut payload = full_payload();
            payload.as_object_mut().unwrap().remove(field);

            // when
            let result = parse(payload);

            // then
            assert_eq!(
                result,
                Err(Error::InvalidInput(MISSING_LOG_DATA.to_string())),
                "field {} should be required",
                field
            );
        }
    }

    #[test]
    fn should_treat_null_fields_as_missing() {
        // given
        let mut payload = full_payload();
        payload["message"] = serde_json::Value::Null;

        // then
        assert_eq!(
            parse(payload),
            Err(Error::InvalidInput(MISSING_LOG_DATA.to_string()))
        );
    }

    #[test]
    fn should_reject_invalid_json() {
        // when
        let result = IngestRequest::from_body(b"not json at all");

        // then
        assert!(matches!(result, Err(Error::InvalidInput(msg)) if msg.starts_with("Invalid JSON")));
    }

    #[test]
    fn should_reject_levels_outside_the_fixed_set() {
        // given
        let mut payload = full_payload();
        payload["level"] = serde_json::json!("debug");

        // when
        let result = parse(payload);

        // then
        assert_eq!(
            result,
            Err(Error::InvalidInput("Unknown level: debug".to_string()))
        );
    }

    #[test]
    fn should_normalize_level_case() {
        // given
        let mut payload = full_payload();
        payload["level"] = serde_json::json!("WaRn");

        // when
        let record = parse(payload).unwrap();

        // then
        assert_eq!(record.level, Level::Warn);
    }

    #[test]
    fn should_sanitize_multi_line_messages() {
        // given
        let mut payload = full_payload();
        payload["message"] = serde_json::json!("first\nsecond");

        // when
        let record = parse(payload).unwrap();

        // then
        assert_eq!(record.message, "first second");
    }

    #[test]
    fn should_ignore_unknown_fields() {
        // given
        let mut payload = full_payload();
        payload["sessionId"] = serde_json::json!("abc");

        // then
        assert!(parse(payload).is_ok());
    }
}

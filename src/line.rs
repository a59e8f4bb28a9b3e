//! Line codec: one [`LogRecord`] per line of flat text.
//!
//! Decoding is versioned. Each historical line shape is one [`ShapeRule`]
//! (pattern plus capture mapping); rules are tried in order, newest first,
//! so a store file spanning a format migration stays fully readable. A line
//! matching no rule decodes to `None` and is skipped by readers.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::model::{ANONYMOUS_USER, Level, LogRecord, sanitize_message};

/// Current shape: `[<timestamp>] [<LEVEL>] (<userId>) [<url>] <message>`.
static CURRENT_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([^\]]+)\] \[([A-Za-z]+)\] \(([^)]*)\) \[([^\]]*)\] (.*)$")
        .expect("line pattern must compile")
});

/// Legacy shape without a user group: `[<timestamp>] [<LEVEL>] [<url>] <message>`.
static LEGACY_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([^\]]+)\] \[([A-Za-z]+)\] \[([^\]]*)\] (.*)$")
        .expect("line pattern must compile")
});

/// One decodable line-shape generation.
struct ShapeRule {
    pattern: &'static Lazy<Regex>,
    build: fn(&Captures) -> Option<LogRecord>,
}

impl ShapeRule {
    fn decode(&self, line: &str) -> Option<LogRecord> {
        let captures = self.pattern.captures(line)?;
        (self.build)(&captures)
    }
}

/// Ordered rule table, newest shape first.
static RULES: &[ShapeRule] = &[
    ShapeRule {
        pattern: &CURRENT_SHAPE,
        build: build_current,
    },
    ShapeRule {
        pattern: &LEGACY_SHAPE,
        build: build_legacy,
    },
];

fn build_current(captures: &Captures) -> Option<LogRecord> {
    let level = Level::parse(&captures[2])?;
    Some(LogRecord {
        timestamp: captures[1].to_string(),
        level,
        user_id: decoded_user(&captures[3]),
        url: captures[4].to_string(),
        message: captures[5].to_string(),
    })
}

fn build_legacy(captures: &Captures) -> Option<LogRecord> {
    let level = Level::parse(&captures[2])?;
    Some(LogRecord {
        timestamp: captures[1].to_string(),
        level,
        user_id: ANONYMOUS_USER.to_string(),
        url: captures[3].to_string(),
        message: captures[4].to_string(),
    })
}

fn decoded_user(raw: &str) -> String {
    if raw.is_empty() {
        ANONYMOUS_USER.to_string()
    } else {
        raw.to_string()
    }
}

/// Renders a record as one line in the current shape. Any line break left in
/// the message is replaced first so the result is always exactly one line.
pub fn encode(record: &LogRecord) -> String {
    format!(
        "[{}] [{}] ({}) [{}] {}",
        record.timestamp,
        record.level,
        record.user_id,
        record.url,
        sanitize_message(&record.message)
    )
}

/// Decodes one stored line, trying every known shape in order. Returns `None`
/// for lines matching no shape; decoding never fails a read.
pub fn decode(line: &str) -> Option<LogRecord> {
    RULES.iter().find_map(|rule| rule.decode(line))
}

/// Decodes a full line sequence, dropping unparseable lines with a warning.
pub(crate) fn decode_lines(lines: &[String]) -> Vec<LogRecord> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let record = decode(line);
            if record.is_none() && !line.trim().is_empty() {
                tracing::warn!(line = index + 1, "skipping unparseable log line");
            }
            record
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn level_strategy() -> impl Strategy<Value = Level> {
        prop_oneof![
            Just(Level::Log),
            Just(Level::Info),
            Just(Level::Warn),
            Just(Level::Error),
        ]
    }

    proptest! {
        #[test]
        fn should_round_trip_line_safe_records(
            timestamp in "[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}\\.[0-9]{3}Z",
            level in level_strategy(),
            user in "[a-zA-Z0-9_-]{1,12}",
            url in "/[a-zA-Z0-9/_.-]{0,30}",
            message in "[a-zA-Z0-9 .,!?:;'#$%&*+=@^_{}~-]*",
        ) {
            let record = LogRecord { timestamp, level, url, message, user_id: user };

            let decoded = decode(&encode(&record));

            prop_assert_eq!(decoded, Some(record));
        }

        #[test]
        fn should_never_panic_on_arbitrary_lines(line in "\\PC*") {
            let _ = decode(&line);
        }
    }
}

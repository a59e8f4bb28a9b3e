use std::sync::RwLock;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, NaiveDate, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;

    /// Current calendar day in UTC.
    fn today_utc(&self) -> NaiveDate {
        DateTime::<Utc>::from(self.now()).date_naive()
    }
}

#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

pub struct MockClock {
    now: RwLock<SystemTime>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::with_time(SystemTime::now())
    }

    pub fn with_time(now: SystemTime) -> Self {
        MockClock {
            now: RwLock::new(now),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.write().unwrap();
        *now += duration;
    }

    pub fn set_time(&self, time: SystemTime) {
        let mut now = self.now.write().unwrap();
        *now = time;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> SystemTime {
        *self.now.read().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-01T12:00:00Z
    const NOON: u64 = 1_704_110_400;

    #[test]
    fn should_derive_utc_day_from_clock() {
        // given
        let clock = MockClock::with_time(SystemTime::UNIX_EPOCH + Duration::from_secs(NOON));

        // then
        assert_eq!(
            clock.today_utc(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn should_roll_over_to_next_day_when_advanced_past_midnight() {
        // given
        let clock = MockClock::with_time(SystemTime::UNIX_EPOCH + Duration::from_secs(NOON));

        // when
        clock.advance(Duration::from_secs(13 * 60 * 60));

        // then
        assert_eq!(
            clock.today_utc(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }
}

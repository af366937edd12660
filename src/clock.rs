use chrono::{DateTime, NaiveDate, Utc};

/// Wall-clock source, in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> i64;

    /// Calendar day (UTC) of `now_ms`.
    fn today(&self) -> NaiveDate {
        DateTime::<Utc>::from_timestamp_millis(self.now_ms())
            .unwrap_or_default()
            .date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl FixedClock {
    pub fn advance(&mut self, ms: i64) {
        self.0 += ms;
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today() {
        // 2023-11-14T22:13:20Z
        let mut clock = FixedClock(1_700_000_000_000);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2023, 11, 14).unwrap());
        clock.advance(2 * 3600 * 1000);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2023, 11, 15).unwrap());
    }

    #[test]
    fn test_system_clock_is_recent() {
        // After 2024-01-01.
        assert!(SystemClock.now_ms() > 1_704_067_200_000);
    }
}

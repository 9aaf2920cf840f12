//! Fetch request and result value objects.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::FeedError;

use super::InstrumentId;

/// Half-open UTC time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range, rejecting `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, FeedError> {
        if end <= start {
            return Err(FeedError::InvalidRange(format!(
                "end {} is not after start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Both endpoints as naive local datetimes in `tz`, for transports
    /// that take naive timestamps interpreted in a named zone.
    pub fn to_naive(&self, tz: Tz) -> (NaiveDateTime, NaiveDateTime) {
        (
            self.start.with_timezone(&tz).naive_local(),
            self.end.with_timezone(&tz).naive_local(),
        )
    }
}

/// Describes one logical fetch: which instruments, over which time range,
/// in which timezone, restricted to regular trading hours or not.
///
/// Immutable once constructed; lives for a single fetch call. The bar spec
/// or tick type travels alongside as the typed per-operation argument.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub instruments: Vec<InstrumentId>,
    pub range: TimeRange,
    /// Named timezone for interpreting naive timestamps.
    pub timezone: Tz,
    /// Restrict to regular trading hours.
    pub use_rth: bool,
}

impl FetchRequest {
    pub fn new(instruments: Vec<InstrumentId>, range: TimeRange, timezone: Tz) -> Self {
        Self {
            instruments,
            range,
            timezone,
            use_rth: true,
        }
    }

    pub fn with_rth(mut self, use_rth: bool) -> Self {
        self.use_rth = use_rth;
        self
    }
}

/// Ordered sequence of retrieved records. Empty is a valid, expected
/// outcome (e.g. no data for a dead symbol/date range).
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult<T> {
    pub records: Vec<T>,
}

impl<T> FetchResult<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_range_rejects_inverted() {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(TimeRange::new(start, end).is_err());
        assert!(TimeRange::new(start, start).is_err());
        assert!(TimeRange::new(end, start).is_ok());
    }

    #[test]
    fn test_to_naive_localizes() {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap();
        let range = TimeRange::new(start, end).unwrap();

        let (s, e) = range.to_naive(chrono_tz::America::New_York);
        // 14:30 UTC is 09:30 in New York during EST.
        assert_eq!(s.to_string(), "2024-01-02 09:30:00");
        assert_eq!(e.to_string(), "2024-01-02 16:00:00");
    }

    #[test]
    fn test_fetch_result_empty() {
        let result: FetchResult<i32> = FetchResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.count(), 0);
    }
}

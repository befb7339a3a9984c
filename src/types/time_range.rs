use chrono::{DateTime, Utc};

/// Inclusive UTC span covered by a set of observations.
///
/// `start == end` is valid and describes a single instant; construction from
/// data guarantees `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Start of the span in epoch milliseconds.
    pub fn start_ms(&self) -> i64 {
        self.start.timestamp_millis()
    }

    /// End of the span in epoch milliseconds.
    pub fn end_ms(&self) -> i64 {
        self.end.timestamp_millis()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Span widened just enough to include `instant`.
    pub(crate) fn extended_to(self, instant: DateTime<Utc>) -> Self {
        Self {
            start: self.start.min(instant),
            end: self.end.max(instant),
        }
    }

    pub(crate) fn single(instant: DateTime<Utc>) -> Self {
        Self {
            start: instant,
            end: instant,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 8, hour, 0, 0).unwrap()
    }

    #[test]
    fn extended_to_widens_in_both_directions() {
        let range = TimeRange::single(at(12)).extended_to(at(3)).extended_to(at(20));
        assert_eq!(range.start, at(3));
        assert_eq!(range.end, at(20));
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let range = TimeRange {
            start: at(1),
            end: at(5),
        };
        assert!(range.contains(at(1)));
        assert!(range.contains(at(5)));
        assert!(!range.contains(at(6)));
    }

    #[test]
    fn single_instant_range_is_valid() {
        let range = TimeRange::single(at(9));
        assert_eq!(range.start_ms(), range.end_ms());
        assert!(range.contains(at(9)));
    }
}

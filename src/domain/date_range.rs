//! Validated calendar date range used by every analytics query.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::error::AnalyticsError;

/// Date format accepted at the boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive range of UTC calendar days, `from <= to`.
///
/// Covers every instant from `from` at midnight up to, but excluding,
/// midnight after `to`, so both end days are counted in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Creates a range from two calendar dates.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidArgument`] if `to` is before `from`
    /// or the day after `to` is not representable.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, AnalyticsError> {
        if to < from {
            return Err(AnalyticsError::InvalidArgument(format!(
                "'to' date {to} is before 'from' date {from}"
            )));
        }
        if to.checked_add_days(Days::new(1)).is_none() {
            return Err(AnalyticsError::InvalidArgument(format!(
                "'to' date {to} is out of range"
            )));
        }
        Ok(Self { from, to })
    }

    /// Parses `YYYY-MM-DD` strings into a range.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidArgument`] naming the offending
    /// parameter if either date is malformed, or if the range is inverted.
    pub fn parse(from: &str, to: &str) -> Result<Self, AnalyticsError> {
        let from = NaiveDate::parse_from_str(from, DATE_FORMAT)
            .map_err(|_| AnalyticsError::InvalidArgument("invalid 'from' date".to_string()))?;
        let to = NaiveDate::parse_from_str(to, DATE_FORMAT)
            .map_err(|_| AnalyticsError::InvalidArgument("invalid 'to' date".to_string()))?;
        Self::new(from, to)
    }

    /// First day of the range.
    #[must_use]
    pub const fn from_date(&self) -> NaiveDate {
        self.from
    }

    /// Last day of the range.
    #[must_use]
    pub const fn to_date(&self) -> NaiveDate {
        self.to
    }

    /// Inclusive lower bound: midnight UTC on `from`.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.from.and_time(NaiveTime::MIN).and_utc()
    }

    /// Exclusive upper bound: midnight UTC on the day after `to`.
    #[must_use]
    pub fn end_exclusive(&self) -> DateTime<Utc> {
        // `new` guarantees the successor day exists.
        self.to
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX)
            .and_time(NaiveTime::MIN)
            .and_utc()
    }

    /// Returns `true` if `at` falls inside the range.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start() && at < self.end_exclusive()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn range(from: &str, to: &str) -> DateRange {
        let Ok(range) = DateRange::parse(from, to) else {
            panic!("valid range");
        };
        range
    }

    #[test]
    fn parses_iso_dates() {
        let r = range("2024-01-01", "2024-01-31");
        assert_eq!(r.from_date().to_string(), "2024-01-01");
        assert_eq!(r.to_date().to_string(), "2024-01-31");
    }

    #[test]
    fn single_day_range_is_valid() {
        let r = range("2024-02-29", "2024-02-29");
        assert_eq!(r.from_date(), r.to_date());
    }

    #[test]
    fn rejects_inverted_range() {
        let result = DateRange::parse("2024-02-01", "2024-01-31");
        assert!(matches!(result, Err(AnalyticsError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_malformed_dates() {
        for (from, to) in [
            ("2024/01/01", "2024-01-31"),
            ("2024-01-01", "31-01-2024"),
            ("", "2024-01-31"),
            ("2024-13-01", "2024-12-31"),
        ] {
            let result = DateRange::parse(from, to);
            assert!(
                matches!(result, Err(AnalyticsError::InvalidArgument(_))),
                "{from}..{to} should be rejected"
            );
        }
    }

    #[test]
    fn names_the_bad_parameter() {
        let Err(err) = DateRange::parse("2024-01-01", "nope") else {
            panic!("expected error");
        };
        assert!(err.to_string().contains("'to'"));
    }

    #[test]
    fn bounds_cover_whole_end_day() {
        let r = range("2024-01-01", "2024-01-31");
        let Some(last_second) = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).single() else {
            panic!("valid timestamp");
        };
        let Some(next_day) = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).single() else {
            panic!("valid timestamp");
        };
        assert!(r.contains(r.start()));
        assert!(r.contains(last_second));
        assert!(!r.contains(next_day));
        assert_eq!(r.end_exclusive(), next_day);
    }
}

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::errors::DateRangeError;

/// Timestamp format shared by CLI arguments, the API's from/to query
/// parameters, and the persisted Date column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, DateRangeError> {
    NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| DateRangeError::InvalidFormat(input.to_string()))
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Renders a calendar day in the shared timestamp format (midnight UTC),
/// as the persisted file stores dates.
pub fn format_day(day: NaiveDate) -> String {
    format!("{}T00:00:00Z", day.format("%Y-%m-%d"))
}

pub fn parse_day(input: &str) -> Result<NaiveDate, DateRangeError> {
    parse_timestamp(input).map(|ts| ts.date_naive())
}

/// A validated inclusive collection window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Validates a user-supplied window against an injected `now`.
    ///
    /// Rejects, in order: unparseable inputs, an end after `now`
    /// (`end == now` is allowed), an end equal to the start, and a start
    /// after the end.
    pub fn validate(
        start_input: &str,
        end_input: &str,
        now: DateTime<Utc>,
    ) -> Result<DateRange, DateRangeError> {
        let start = parse_timestamp(start_input)?;
        let end = parse_timestamp(end_input)?;

        if end > now {
            return Err(DateRangeError::EndInFuture(end_input.to_string()));
        }
        if end == start {
            return Err(DateRangeError::EmptyRange(start_input.to_string()));
        }
        if start > end {
            return Err(DateRangeError::OutOfOrder {
                start: start_input.to_string(),
                end: end_input.to_string(),
            });
        }
        Ok(DateRange { start, end })
    }

    /// Default window when no dates are given: the 7 days ending at `now`.
    pub fn last_week(now: DateTime<Utc>) -> DateRange {
        DateRange {
            start: now - Duration::days(7),
            end: now,
        }
    }

    /// The calendar day immediately before the window, fetched only so the
    /// first requested day has a predecessor to subtract against.
    pub fn seed_day(&self) -> NaiveDate {
        self.start.date_naive() - Duration::days(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        parse_timestamp("2024-01-15T12:00:00Z").unwrap()
    }

    #[test]
    fn accepts_last_week_through_now() {
        let range = DateRange::validate("2024-01-08T12:00:00Z", "2024-01-15T12:00:00Z", now())
            .expect("range to validate");
        assert_eq!(range, DateRange::last_week(now()));
    }

    #[test]
    fn rejects_equal_dates() {
        let err = DateRange::validate("2024-01-10T00:00:00Z", "2024-01-10T00:00:00Z", now())
            .unwrap_err();
        assert!(matches!(err, DateRangeError::EmptyRange(_)));
    }

    #[test]
    fn rejects_out_of_order_dates() {
        let err = DateRange::validate("2024-01-10T00:00:00Z", "2024-01-01T00:00:00Z", now())
            .unwrap_err();
        assert!(matches!(err, DateRangeError::OutOfOrder { .. }));
    }

    #[test]
    fn rejects_end_in_the_future() {
        let err = DateRange::validate("2024-01-10T00:00:00Z", "2024-02-01T00:00:00Z", now())
            .unwrap_err();
        assert!(matches!(err, DateRangeError::EndInFuture(_)));
    }

    #[test]
    fn rejects_malformed_input() {
        let err = DateRange::validate("2024-01-10", "2024-01-12T00:00:00Z", now()).unwrap_err();
        assert!(matches!(err, DateRangeError::InvalidFormat(_)));
    }

    #[test]
    fn seed_day_is_the_day_before_the_start() {
        let range = DateRange::validate("2024-01-10T09:30:00Z", "2024-01-12T00:00:00Z", now())
            .expect("range to validate");
        assert_eq!(range.seed_day(), "2024-01-09".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn day_format_round_trips() {
        let day: NaiveDate = "2024-01-10".parse().unwrap();
        assert_eq!(format_day(day), "2024-01-10T00:00:00Z");
        assert_eq!(parse_day("2024-01-10T00:00:00Z").unwrap(), day);
    }
}

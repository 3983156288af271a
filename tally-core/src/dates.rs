//! Date utilities: the fixed operation timestamp format and row date filters.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{LedgerError, Result};
use crate::transaction::Transaction;

/// Format of the operation timestamp column, e.g. `24.11.2021 13:05:00`.
pub const OPERATION_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Format of date-only user input, e.g. `24.11.2021`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse an operation timestamp; surrounding whitespace is ignored.
pub fn parse_operation_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), OPERATION_FORMAT).ok()
}

/// Parse a cutoff given either as `DD.MM.YYYY HH:MM:SS` or as `DD.MM.YYYY`.
///
/// A bare date covers the whole day: it resolves to `23:59:59`.
pub fn parse_cutoff(raw: &str) -> Result<NaiveDateTime> {
    if let Some(ts) = parse_operation_timestamp(raw) {
        return Ok(ts);
    }
    let date = parse_date(raw)?;
    Ok(end_of_day(date))
}

/// Parse a `DD.MM.YYYY` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| LedgerError::parse(0, "date", raw))
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
}

/// Row predicate over the operation timestamp.
///
/// Rows without a parsed timestamp never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// `timestamp <= cutoff`
    OnOrBefore(NaiveDateTime),
    /// Calendar month `month` of `year`
    InMonth { year: i32, month: u32 },
    /// `start <= timestamp <= end`
    Between {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl DateFilter {
    /// Month filter; rejects months outside `1..=12`.
    pub fn in_month(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::parse(0, "month", month.to_string()));
        }
        Ok(Self::InMonth { year, month })
    }

    /// Window from `start` (midnight) through one month later minus a day.
    pub fn period_from(start: NaiveDate) -> Self {
        let (start, end) = period_bounds(start);
        Self::Between { start, end }
    }

    pub fn matches_time(&self, ts: NaiveDateTime) -> bool {
        match *self {
            DateFilter::OnOrBefore(cutoff) => ts <= cutoff,
            DateFilter::InMonth { year, month } => ts.year() == year && ts.month() == month,
            DateFilter::Between { start, end } => start <= ts && ts <= end,
        }
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        txn.timestamp.is_some_and(|ts| self.matches_time(ts))
    }
}

/// Bounds of the period starting at `start`: both ends at midnight, the end
/// being `start + 1 month - 1 day` (month arithmetic clamps to month end).
pub fn period_bounds(start: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let next = start
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    let end = next.pred_opt().unwrap_or(next);
    (
        start.and_time(NaiveTime::MIN),
        end.and_time(NaiveTime::MIN),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_operation_timestamp() {
        assert_eq!(
            parse_operation_timestamp(" 24.11.2021 13:05:00 "),
            Some(dt(2021, 11, 24, 13, 5, 0))
        );
        assert_eq!(parse_operation_timestamp("2021-11-24 13:05:00"), None);
        assert_eq!(parse_operation_timestamp("31.02.2021 00:00:00"), None);
        assert_eq!(parse_operation_timestamp(""), None);
    }

    #[test]
    fn test_parse_cutoff_accepts_both_forms() {
        assert_eq!(parse_cutoff("24.11.2021").unwrap(), dt(2021, 11, 24, 23, 59, 59));
        assert_eq!(
            parse_cutoff("24.11.2021 08:00:00").unwrap(),
            dt(2021, 11, 24, 8, 0, 0)
        );
        assert!(parse_cutoff("2021/11/24").is_err());
    }

    #[test]
    fn test_on_or_before_is_inclusive() {
        let cutoff = dt(2021, 12, 27, 12, 0, 0);
        let filter = DateFilter::OnOrBefore(cutoff);
        assert!(filter.matches_time(cutoff));
        assert!(!filter.matches_time(dt(2021, 12, 27, 12, 0, 1)));
    }

    #[test]
    fn test_in_month_excludes_neighbours() {
        let filter = DateFilter::in_month(2023, 8).unwrap();
        assert!(!filter.matches_time(dt(2023, 7, 31, 23, 59, 59)));
        assert!(filter.matches_time(dt(2023, 8, 1, 0, 0, 0)));
        assert!(filter.matches_time(dt(2023, 8, 31, 23, 59, 59)));
        assert!(!filter.matches_time(dt(2023, 9, 1, 0, 0, 0)));
        assert!(!filter.matches_time(dt(2022, 8, 15, 0, 0, 0)));
    }

    #[test]
    fn test_in_month_rejects_bad_month() {
        assert!(DateFilter::in_month(2023, 0).is_err());
        assert!(DateFilter::in_month(2023, 13).is_err());
    }

    #[test]
    fn test_period_bounds() {
        let start = NaiveDate::from_ymd_opt(2023, 9, 1).unwrap();
        let (from, to) = period_bounds(start);
        assert_eq!(from, dt(2023, 9, 1, 0, 0, 0));
        assert_eq!(to, dt(2023, 9, 30, 0, 0, 0));

        let start = NaiveDate::from_ymd_opt(2023, 9, 15).unwrap();
        assert_eq!(period_bounds(start).1, dt(2023, 10, 14, 0, 0, 0));

        // Jan 31 + 1 month clamps to Feb 28, minus a day
        let start = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        assert_eq!(period_bounds(start).1, dt(2023, 2, 27, 0, 0, 0));
    }

    #[test]
    fn test_filter_skips_rows_without_timestamp() {
        let filter = DateFilter::OnOrBefore(NaiveDateTime::MAX);
        assert!(!filter.matches(&Transaction::new("not a date")));
        assert!(filter.matches(&Transaction::new("01.01.2020 00:00:00")));
    }
}

//! Calendar views: spend per weekday and per workday/weekend.
//!
//! Buckets are computed per call and returned sparse: a weekday or day type
//! with no rows is absent from the map rather than zero.

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tally_core::{DateFilter, TransactionTable};

/// Monday = 0 … Sunday = 6
pub fn weekday_index(ts: NaiveDateTime) -> u8 {
    ts.weekday().num_days_from_monday() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DayType {
    #[serde(rename = "workday")]
    Workday,
    #[serde(rename = "weekend")]
    Weekend,
}

impl DayType {
    pub fn of(weekday: u8) -> Self {
        if weekday < 5 {
            DayType::Workday
        } else {
            DayType::Weekend
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayType::Workday => "workday",
            DayType::Weekend => "weekend",
        }
    }
}

fn bucket_amounts<K, F>(table: &TransactionTable, cutoff: NaiveDateTime, key: F) -> BTreeMap<K, Decimal>
where
    K: Ord,
    F: Fn(NaiveDateTime) -> K,
{
    let filter = DateFilter::OnOrBefore(cutoff);
    let mut buckets = BTreeMap::new();
    for txn in table.iter().filter(|t| filter.matches(t)) {
        let (Some(ts), Some(amount)) = (txn.timestamp, txn.amount) else {
            continue;
        };
        *buckets.entry(key(ts)).or_insert(Decimal::ZERO) += amount;
    }
    buckets
}

/// Sum of `amount` per weekday index over rows at or before `cutoff`.
pub fn spend_by_weekday(table: &TransactionTable, cutoff: NaiveDateTime) -> BTreeMap<u8, Decimal> {
    bucket_amounts(table, cutoff, weekday_index)
}

/// Sum of `amount` per day type over rows at or before `cutoff`.
pub fn spend_by_day_type(
    table: &TransactionTable,
    cutoff: NaiveDateTime,
) -> BTreeMap<DayType, Decimal> {
    bucket_amounts(table, cutoff, |ts| DayType::of(weekday_index(ts)))
}

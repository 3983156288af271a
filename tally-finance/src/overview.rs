//! Overview page data: greeting by hour and the transactions of one period.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tally_core::dates::period_bounds;
use tally_core::{DateFilter, Transaction, TransactionTable};
use tracing::info;

use crate::market::MarketSnapshot;

/// Greeting for an hour of the day (0–23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Доброе утро",
        12..=17 => "Добрый день",
        18..=21 => "Добрый вечер",
        _ => "Доброй ночи",
    }
}

/// Rows with `start <= timestamp <= start + 1 month - 1 day`, in source order.
pub fn transactions_in_period<'a>(table: &'a TransactionTable, start: NaiveDate) -> Vec<&'a Transaction> {
    let filter = DateFilter::period_from(start);
    table.iter().filter(|txn| filter.matches(txn)).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview<'a> {
    pub greeting: &'static str,
    pub period_start: NaiveDateTime,
    pub period_end: NaiveDateTime,
    pub transactions: Vec<&'a Transaction>,
    pub market: MarketSnapshot,
}

impl<'a> Overview<'a> {
    pub fn build(
        table: &'a TransactionTable,
        start: NaiveDate,
        hour: u32,
        market: MarketSnapshot,
    ) -> Self {
        let (period_start, period_end) = period_bounds(start);
        let transactions = transactions_in_period(table, start);
        info!(%period_start, %period_end, rows = transactions.len(), "overview period");
        Self {
            greeting: greeting(hour),
            period_start,
            period_end,
            transactions,
            market,
        }
    }
}

//! Turning raw source cells into typed transactions.
//!
//! Cells arrive as `Option<String>`: `None` when the source has no cell at
//! that position (short CSV record, empty spreadsheet cell).

use rust_decimal::Decimal;
use std::str::FromStr;
use tally_core::{Cashback, LedgerError, Result, Transaction, parse_operation_timestamp};
use tracing::debug;

use crate::columns::{self, ColumnMap};

/// Parse a bank-formatted number: `-1 234,56`, `150.75`, `"1 000"`.
/// Returns `None` for text that is not a number.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}' | '"'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

fn cell(cells: &[Option<String>], idx: usize) -> Option<&str> {
    cells.get(idx).and_then(|c| c.as_deref())
}

/// Present and not blank.
fn text(cells: &[Option<String>], idx: usize) -> Option<String> {
    cell(cells, idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Required numeric column: blank is `None`, garbage fails the row.
fn decimal(cells: &[Option<String>], idx: usize, row: usize, field: &str) -> Result<Option<Decimal>> {
    match cell(cells, idx).map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_amount(raw)
            .map(Some)
            .ok_or_else(|| LedgerError::parse(row, field, raw)),
    }
}

fn cashback(cells: &[Option<String>], idx: usize) -> Cashback {
    match cell(cells, idx).map(str::trim).filter(|s| !s.is_empty()) {
        None => Cashback::Absent,
        Some(raw) => match parse_amount(raw) {
            Some(v) => Cashback::Value(v),
            None => Cashback::Invalid(raw.to_string()),
        },
    }
}

/// Build the transaction for data row `row` (0-based).
pub fn build_transaction(row: usize, cells: &[Option<String>], map: &ColumnMap) -> Result<Transaction> {
    let timestamp_raw = cell(cells, map.timestamp).unwrap_or("").to_string();
    let timestamp = parse_operation_timestamp(&timestamp_raw);
    if timestamp.is_none() {
        debug!(row, value = %timestamp_raw, "operation timestamp does not parse");
    }

    Ok(Transaction {
        timestamp,
        timestamp_raw,
        category: text(cells, map.category),
        amount: decimal(cells, map.amount, row, columns::AMOUNT)?,
        amount_rounded: decimal(cells, map.amount_rounded, row, columns::AMOUNT_ROUNDED)?,
        card_number: text(cells, map.card_number),
        cashback: cashback(cells, map.cashback),
        description: cell(cells, map.description).map(str::to_string),
    })
}

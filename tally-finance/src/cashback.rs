//! Cashback earned per category within one calendar month.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tally_core::{DateFilter, LedgerError, Result, TransactionTable};
use tracing::{info, warn};

use tally_core::transaction::fields::TIMESTAMP as TIMESTAMP_FIELD;

/// Sum cashback per category for rows in `month` of `year`.
///
/// A timestamp cell that is filled in but does not parse fails the whole
/// analysis with a parse error; a blank cell only keeps that row out of the
/// month. Absent cashback counts as zero, non-numeric
/// cashback is left out. Rows without a category have no group and are
/// skipped; categories totalling zero are omitted.
pub fn cashback_by_category(
    table: &TransactionTable,
    year: i32,
    month: u32,
) -> Result<BTreeMap<String, Decimal>> {
    let filter = DateFilter::in_month(year, month)?;

    if let Some((row, txn)) = table
        .iter()
        .enumerate()
        .find(|(_, txn)| txn.timestamp.is_none() && !txn.timestamp_raw.trim().is_empty())
    {
        return Err(LedgerError::parse(row, TIMESTAMP_FIELD, txn.timestamp_raw.clone()));
    }

    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut in_month = 0usize;
    for (row, txn) in table.iter().enumerate() {
        if !filter.matches(txn) {
            continue;
        }
        in_month += 1;
        let Some(category) = txn.category.as_deref() else {
            continue;
        };
        match txn.cashback.contribution() {
            Some(value) => *totals.entry(category.to_string()).or_insert(Decimal::ZERO) += value,
            None => warn!(row, category, "non-numeric cashback left out"),
        }
    }
    totals.retain(|_, total| !total.is_zero());

    info!(year, month, rows = in_month, categories = totals.len(), "cashback computed");
    Ok(totals)
}

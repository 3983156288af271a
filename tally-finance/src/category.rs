//! Category views: spend for one category up to a cutoff, and category search.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use tally_core::{DateFilter, Transaction, TransactionTable};
use tracing::debug;

/// Total spend for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub until: NaiveDateTime,
    pub total: Decimal,
}

/// Sum `amount` over rows whose category equals `category` exactly
/// (case-sensitive) and whose timestamp is at or before `cutoff`.
///
/// Rows without a parsed timestamp are skipped; no match gives zero.
pub fn spend_by_category(
    table: &TransactionTable,
    category: &str,
    cutoff: NaiveDateTime,
) -> CategorySpend {
    let filter = DateFilter::OnOrBefore(cutoff);
    let mut total = Decimal::ZERO;
    let mut matched = 0usize;

    for txn in table {
        if txn.category.as_deref() != Some(category) || !filter.matches(txn) {
            continue;
        }
        if let Some(amount) = txn.amount {
            total += amount;
            matched += 1;
        }
    }

    debug!(category, matched, %total, "category spend");
    CategorySpend {
        category: category.to_string(),
        until: cutoff,
        total,
    }
}

/// Rows whose category contains `query`, ignoring case, in source order.
///
/// The query is literal text. An empty query matches nothing.
pub fn search_by_category<'a>(table: &'a TransactionTable, query: &str) -> Vec<&'a Transaction> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let found: Vec<&Transaction> = table
        .iter()
        .filter(|txn| {
            txn.category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
        })
        .collect();
    debug!(query, found = found.len(), "category search");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::parse_cutoff;

    fn table() -> TransactionTable {
        TransactionTable::new(vec![
            Transaction::new("25.12.2021 12:00:00")
                .with_category("Продукты")
                .with_amount(Decimal::new(100, 0)),
            Transaction::new("26.12.2021 12:00:00")
                .with_category("Одежда")
                .with_amount(Decimal::new(200, 0)),
            Transaction::new("27.12.2021 12:00:00")
                .with_category("Продукты")
                .with_amount(Decimal::new(150, 0)),
            Transaction::new("28.12.2021 12:00:00")
                .with_category("продукты")
                .with_amount(Decimal::new(999, 0)),
            Transaction::new("garbage")
                .with_category("Продукты")
                .with_amount(Decimal::new(5000, 0)),
            Transaction::new("29.12.2021 12:00:00").with_amount(Decimal::new(1, 0)),
        ])
    }

    #[test]
    fn test_exact_case_sensitive_match() {
        let spend = spend_by_category(&table(), "Продукты", parse_cutoff("31.12.2022").unwrap());
        assert_eq!(spend.total, Decimal::new(250, 0));
        assert_eq!(spend.category, "Продукты");
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let spend = spend_by_category(
            &table(),
            "Продукты",
            parse_cutoff("27.12.2021 12:00:00").unwrap(),
        );
        assert_eq!(spend.total, Decimal::new(250, 0));

        let spend = spend_by_category(
            &table(),
            "Продукты",
            parse_cutoff("27.12.2021 11:59:59").unwrap(),
        );
        assert_eq!(spend.total, Decimal::new(100, 0));
    }

    #[test]
    fn test_no_match_is_zero() {
        let spend = spend_by_category(&table(), "Транспорт", parse_cutoff("31.12.2022").unwrap());
        assert_eq!(spend.total, Decimal::ZERO);
    }

    #[test]
    fn test_negative_amounts_keep_sign() {
        let t = TransactionTable::new(vec![
            Transaction::new("01.01.2022 10:00:00")
                .with_category("Кафе")
                .with_amount(Decimal::new(-30050, 2)),
            Transaction::new("02.01.2022 10:00:00")
                .with_category("Кафе")
                .with_amount(Decimal::new(5000, 2)),
        ]);
        let spend = spend_by_category(&t, "Кафе", parse_cutoff("31.01.2022").unwrap());
        assert_eq!(spend.total, Decimal::new(-25050, 2));
    }

    #[test]
    fn test_search_ignores_case_and_keeps_order() {
        let t = table();
        let found = search_by_category(&t, "ПРОДУК");
        assert_eq!(found.len(), 4);
        assert_eq!(found[0].amount, Some(Decimal::new(100, 0)));
        assert_eq!(found[2].category.as_deref(), Some("продукты"));
    }

    #[test]
    fn test_search_is_literal_text() {
        let t = TransactionTable::new(vec![
            Transaction::new("01.01.2022 10:00:00").with_category("Связь (моб.)"),
            Transaction::new("01.01.2022 10:00:00").with_category("Связь"),
        ]);
        assert_eq!(search_by_category(&t, "(моб.)").len(), 1);
        assert!(search_by_category(&t, ".*").is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        assert!(search_by_category(&table(), "").is_empty());
    }

    #[test]
    fn test_search_skips_rows_without_category() {
        let t = table();
        let found = search_by_category(&t, "о");
        assert!(found.iter().all(|txn| txn.category.is_some()));
        assert_eq!(found.len(), 5);
    }
}

//! Per-card totals over the bank's rounded operation amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tally_core::TransactionTable;
use tracing::info;

/// Report shape: `{"Номер карты": "*4556", "Сумма операций": 400}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardTotal {
    #[serde(rename = "Номер карты")]
    pub card_number: String,
    #[serde(rename = "Сумма операций")]
    pub total: Decimal,
}

/// Round to a whole number, ties to the even neighbour (400.5 -> 400,
/// 401.5 -> 402).
pub fn round_total(sum: Decimal) -> Decimal {
    sum.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// Sum `amount_rounded` over rows with exactly this card number, then round
/// the sum once. A card with no rows totals zero.
pub fn total_for_card(table: &TransactionTable, card_number: &str) -> CardTotal {
    let mut sum = Decimal::ZERO;
    let mut matched = 0usize;
    for txn in table {
        if txn.card_number.as_deref() == Some(card_number) {
            matched += 1;
            sum += txn.amount_rounded.unwrap_or(Decimal::ZERO);
        }
    }
    let total = round_total(sum);
    info!(card = card_number, matched, %total, "card total");
    CardTotal {
        card_number: card_number.to_string(),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::Transaction;

    fn row(card: &str, amount: Decimal) -> Transaction {
        Transaction::new("01.01.2022 10:00:00")
            .with_card(card)
            .with_amount_rounded(amount)
    }

    #[test]
    fn test_single_transaction_rounds() {
        let table = TransactionTable::new(vec![row("*3456", Decimal::new(15075, 2))]);
        assert_eq!(total_for_card(&table, "*3456").total, Decimal::new(151, 0));
    }

    #[test]
    fn test_multiple_transactions() {
        let table = TransactionTable::new(vec![
            row("*3456", Decimal::new(15075, 2)),
            row("*3456", Decimal::new(4950, 2)),
            row("*7654", Decimal::new(10000, 2)),
            row("*3456", Decimal::new(20025, 2)),
        ]);
        assert_eq!(total_for_card(&table, "*3456").total, Decimal::new(400, 0));
    }

    #[test]
    fn test_unknown_card_is_zero() {
        let table = TransactionTable::new(vec![row("*7654", Decimal::new(100, 0))]);
        let total = total_for_card(&table, "*3456");
        assert_eq!(total.total, Decimal::ZERO);
        assert_eq!(total.card_number, "*3456");
        assert_eq!(total_for_card(&TransactionTable::empty(), "*5091").total, Decimal::ZERO);
    }

    #[test]
    fn test_rounds_once_after_summing() {
        // Per-row rounding would give 0 + 0 + 0; the sum 1.5 rounds to 2.
        let table = TransactionTable::new(vec![
            row("*1", Decimal::new(5, 1)),
            row("*1", Decimal::new(5, 1)),
            row("*1", Decimal::new(5, 1)),
        ]);
        assert_eq!(total_for_card(&table, "*1").total, Decimal::TWO);
    }

    #[test]
    fn test_ties_round_to_even() {
        assert_eq!(round_total(Decimal::new(4005, 1)), Decimal::new(400, 0));
        assert_eq!(round_total(Decimal::new(4015, 1)), Decimal::new(402, 0));
        assert_eq!(round_total(Decimal::new(25, 1)), Decimal::new(2, 0));
        assert_eq!(round_total(Decimal::new(-25, 1)), Decimal::new(-2, 0));
        assert_eq!(round_total(Decimal::new(251, 2)), Decimal::new(3, 0));
        assert_eq!(round_total(Decimal::new(249, 2)), Decimal::new(2, 0));
    }

    #[test]
    fn test_card_match_is_exact() {
        let table = TransactionTable::new(vec![row("*3456", Decimal::ONE), row("3456", Decimal::TEN)]);
        assert_eq!(total_for_card(&table, "*3456").total, Decimal::ONE);
    }

    #[test]
    fn test_report_shape() {
        let table = TransactionTable::new(vec![row("*5091", Decimal::new(100, 0))]);
        let json = serde_json::to_value(total_for_card(&table, "*5091")).unwrap();
        assert_eq!(json["Номер карты"], "*5091");
        assert_eq!(json["Сумма операций"], serde_json::json!(100.0));
    }
}

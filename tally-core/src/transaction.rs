//! Transaction records and the read-only table every analysis reads

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dates::parse_operation_timestamp;

/// Source labels of the transaction fields, used in loaders and error reports.
pub mod fields {
    pub const TIMESTAMP: &str = "Дата операции";
    pub const CATEGORY: &str = "Категория";
    pub const AMOUNT: &str = "Сумма операции";
    pub const AMOUNT_ROUNDED: &str = "Сумма операции с округлением";
    pub const CARD_NUMBER: &str = "Номер карты";
    pub const CASHBACK: &str = "Кэшбэк";
    pub const DESCRIPTION: &str = "Описание";
}

/// Cashback cell as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cashback {
    /// Empty cell; aggregates as zero.
    #[default]
    Absent,
    Value(Decimal),
    /// Non-numeric text; excluded from aggregation rather than coerced.
    Invalid(String),
}

impl Cashback {
    /// Amount to add into a cashback total, `None` for invalid cells.
    pub fn contribution(&self) -> Option<Decimal> {
        match self {
            Cashback::Absent => Some(Decimal::ZERO),
            Cashback::Value(v) => Some(*v),
            Cashback::Invalid(_) => None,
        }
    }
}

/// One ledger row
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// Operation time, `None` when absent or not in `DD.MM.YYYY HH:MM:SS`
    pub timestamp: Option<NaiveDateTime>,
    /// Source text of the timestamp cell
    #[serde(skip)]
    pub timestamp_raw: String,
    pub category: Option<String>,
    /// Signed amount as recorded
    pub amount: Option<Decimal>,
    /// Rounded amount stored by the bank; only the card ledger reads it
    pub amount_rounded: Option<Decimal>,
    /// Masked card, e.g. `*4556`
    pub card_number: Option<String>,
    pub cashback: Cashback,
    /// `None` = cell absent, `Some("")` = present but empty
    pub description: Option<String>,
}

impl Transaction {
    /// Start a record from the raw timestamp text.
    pub fn new(timestamp: &str) -> Self {
        Self {
            timestamp: parse_operation_timestamp(timestamp),
            timestamp_raw: timestamp.to_string(),
            ..Self::default()
        }
    }

    pub fn at(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp: Some(timestamp),
            timestamp_raw: timestamp.format(crate::dates::OPERATION_FORMAT).to_string(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_amount_rounded(mut self, amount: Decimal) -> Self {
        self.amount_rounded = Some(amount);
        self
    }

    pub fn with_card(mut self, card_number: impl Into<String>) -> Self {
        self.card_number = Some(card_number.into());
        self
    }

    pub fn with_cashback(mut self, cashback: Cashback) -> Self {
        self.cashback = cashback;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True when the row has a timestamp at or before `cutoff`.
    pub fn is_on_or_before(&self, cutoff: NaiveDateTime) -> bool {
        self.timestamp.is_some_and(|ts| ts <= cutoff)
    }
}

/// Ordered transactions in source row order.
///
/// Built once by a loader and only read afterwards; row indices refer to
/// positions in this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransactionTable {
    rows: Vec<Transaction>,
}

impl TransactionTable {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }
}

impl From<Vec<Transaction>> for TransactionTable {
    fn from(rows: Vec<Transaction>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<Transaction> for TransactionTable {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

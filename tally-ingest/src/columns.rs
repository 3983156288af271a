//! Fixed column labels of the bank operations export and header lookup.

use tally_core::{LedgerError, Result};

pub use tally_core::transaction::fields::{
    AMOUNT, AMOUNT_ROUNDED, CARD_NUMBER, CASHBACK, CATEGORY, DESCRIPTION, TIMESTAMP,
};

/// Every column a source must carry, in no particular order.
pub const REQUIRED: [&str; 7] = [
    TIMESTAMP,
    CATEGORY,
    AMOUNT,
    AMOUNT_ROUNDED,
    CARD_NUMBER,
    CASHBACK,
    DESCRIPTION,
];

/// Positions of the required columns within a source header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub timestamp: usize,
    pub category: usize,
    pub amount: usize,
    pub amount_rounded: usize,
    pub card_number: usize,
    pub cashback: usize,
    pub description: usize,
}

impl ColumnMap {
    /// Locate each label by exact match (labels are trimmed, a UTF-8 BOM on
    /// the first header is dropped). Extra columns are ignored.
    pub fn from_headers<S: AsRef<str>>(headers: &[S], source_name: &str) -> Result<Self> {
        let find = |label: &str| {
            headers
                .iter()
                .position(|h| h.as_ref().trim_start_matches('\u{feff}').trim() == label)
                .ok_or_else(|| LedgerError::MissingColumn {
                    source_name: source_name.to_string(),
                    column: label.to_string(),
                })
        };

        Ok(Self {
            timestamp: find(TIMESTAMP)?,
            category: find(CATEGORY)?,
            amount: find(AMOUNT)?,
            amount_rounded: find(AMOUNT_ROUNDED)?,
            card_number: find(CARD_NUMBER)?,
            cashback: find(CASHBACK)?,
            description: find(DESCRIPTION)?,
        })
    }
}

//! Phone numbers mentioned in transaction descriptions.

use regex::Regex;
use serde::Serialize;
use tally_core::{LedgerError, Result, TransactionTable};
use tracing::debug;

use tally_core::transaction::fields::DESCRIPTION as DESCRIPTION_FIELD;

/// Russian-style numbers: optional `8`/`+7` prefix and separator, a 3-digit
/// code (parentheses optional) and separator, then 7–10 digits, hyphens or
/// spaces.
pub const PHONE_PATTERN: &str = r"(?:(?:8|\+7)[\- ])?(?:\(?\d{3}\)?[\- ])[\d\- ]{7,10}";

/// A row whose description mentions at least one phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneMatch {
    /// Position of the row in the source
    pub index: usize,
    /// Description with surrounding whitespace removed
    pub description: String,
    pub phones: Vec<String>,
}

/// Compiled phone matcher
#[derive(Debug, Clone)]
pub struct PhoneExtractor {
    pattern: Regex,
}

impl PhoneExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(PHONE_PATTERN)?,
        })
    }

    /// Non-overlapping matches, left to right, exactly as written.
    pub fn extract(&self, description: &str) -> Vec<String> {
        if description.trim().is_empty() {
            return Vec::new();
        }
        self.pattern
            .find_iter(description)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Rows (in source order) whose trimmed description yields a match.
    ///
    /// Empty descriptions are skipped. A row with no description cell at all
    /// fails the scan with `MissingField`.
    pub fn scan(&self, table: &TransactionTable) -> Result<Vec<PhoneMatch>> {
        let mut out = Vec::new();
        for (index, txn) in table.iter().enumerate() {
            let description = txn
                .description
                .as_deref()
                .ok_or_else(|| LedgerError::MissingField {
                    row: index,
                    field: DESCRIPTION_FIELD.to_string(),
                })?
                .trim();
            if description.is_empty() {
                continue;
            }

            let phones = self.extract(description);
            if phones.is_empty() {
                continue;
            }
            debug!(index, ?phones, "phones found");
            out.push(PhoneMatch {
                index,
                description: description.to_string(),
                phones,
            });
        }
        Ok(out)
    }
}

/// One-shot helper around [`PhoneExtractor::extract`].
pub fn extract_phones(description: &str) -> Result<Vec<String>> {
    Ok(PhoneExtractor::new()?.extract(description))
}

/// One-shot helper around [`PhoneExtractor::scan`].
pub fn find_transactions_with_phones(table: &TransactionTable) -> Result<Vec<PhoneMatch>> {
    PhoneExtractor::new()?.scan(table)
}

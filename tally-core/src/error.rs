//! Error types shared by the loader and the analyzers

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// The source could not be opened or decoded.
    #[error("cannot load transactions from '{source_name}': {reason}")]
    Load { source_name: String, reason: String },

    /// A fixed column label was not found in the source header.
    #[error("'{source_name}' has no '{column}' column")]
    MissingColumn { source_name: String, column: String },

    /// A value failed its fixed-format parse.
    #[error("row {row}: cannot parse {field} from '{value}'")]
    Parse {
        row: usize,
        field: String,
        value: String,
    },

    /// A structurally required field is absent on a row being processed.
    #[error("row {row}: required field '{field}' is missing")]
    MissingField { row: usize, field: String },

    #[error("Regex error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LedgerError {
    pub fn load(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Load {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(row: usize, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Parse {
            row,
            field: field.into(),
            value: value.into(),
        }
    }

    /// True for failures that happen while building a table (LoadError class).
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Load { .. } | Self::MissingColumn { .. } | Self::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

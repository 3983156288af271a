//! tally-ingest: builds a `TransactionTable` from an operations export (CSV or spreadsheet).

pub mod columns;
pub mod csv_source;
pub mod rows;
#[cfg(feature = "xlsx")]
pub mod xlsx_source;

use std::path::Path;
use tally_core::{LedgerError, Result, TransactionTable};
use tracing::warn;

pub use csv_source::{load_csv_path, load_csv_reader};

/// Source kinds recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Csv,
    Spreadsheet,
}

impl SourceKind {
    pub fn detect(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xls" | "ods") => SourceKind::Spreadsheet,
            _ => SourceKind::Csv,
        }
    }
}

/// Load the operations export at `path`.
///
/// An empty path is a valid degenerate source and yields an empty table.
pub fn load_path(path: impl AsRef<Path>) -> Result<TransactionTable> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        warn!("empty source path, nothing to load");
        return Ok(TransactionTable::empty());
    }
    if !path.is_file() {
        return Err(LedgerError::load(path.display().to_string(), "file not found"));
    }

    match SourceKind::detect(path) {
        SourceKind::Csv => load_csv_path(path),
        SourceKind::Spreadsheet => load_spreadsheet(path),
    }
}

#[cfg(feature = "xlsx")]
fn load_spreadsheet(path: &Path) -> Result<TransactionTable> {
    xlsx_source::load_xlsx_path(path)
}

#[cfg(not(feature = "xlsx"))]
fn load_spreadsheet(path: &Path) -> Result<TransactionTable> {
    Err(LedgerError::load(
        path.display().to_string(),
        "spreadsheet support is disabled (build with the `xlsx` feature)",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_gives_empty_table() {
        let table = load_path("").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load_path("/nonexistent/operations.xlsx").unwrap_err();
        assert!(err.is_load_error());
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_source_kind_detection() {
        assert_eq!(SourceKind::detect(Path::new("ops.XLSX")), SourceKind::Spreadsheet);
        assert_eq!(SourceKind::detect(Path::new("ops.csv")), SourceKind::Csv);
        assert_eq!(SourceKind::detect(Path::new("ops")), SourceKind::Csv);
    }

    #[test]
    fn test_loads_csv_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("operations.csv");
        std::fs::write(
            &path,
            "Дата операции,Категория,Сумма операции,Сумма операции с округлением,Номер карты,Кэшбэк,Описание\n\
             01.08.2023 12:00:00,Еда,-100,100,*4556,,Кафе\n",
        )
        .unwrap();
        let table = load_path(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0).unwrap().category.as_deref(), Some("Еда"));
    }
}

//! Spreadsheet operations export (first worksheet), feature `xlsx`.

use calamine::{Data, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::path::Path;
use tally_core::dates::OPERATION_FORMAT;
use tally_core::{LedgerError, Result, TransactionTable};
use tracing::info;

use crate::columns::ColumnMap;
use crate::rows::build_transaction;

/// Excel serial day number to a timestamp (epoch 1899-12-30, which absorbs
/// the 1900 leap year bug).
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    base.checked_add_signed(Duration::seconds(seconds))
}

/// Render a cell the way the CSV loader would have seen it.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64())
            .map(|ts| ts.format(OPERATION_FORMAT).to_string()),
        other => Some(other.to_string()),
    }
}

pub fn load_xlsx_path(path: &Path) -> Result<TransactionTable> {
    let name = path.display().to_string();
    let mut workbook =
        calamine::open_workbook_auto(path).map_err(|e| LedgerError::load(&name, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LedgerError::load(&name, "workbook has no worksheets"))?
        .map_err(|e| LedgerError::load(&name, e))?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .ok_or_else(|| LedgerError::load(&name, "worksheet has no header row"))?
        .iter()
        .map(|c| cell_text(c).unwrap_or_default())
        .collect();
    let map = ColumnMap::from_headers(&headers, &name)?;

    let mut rows = Vec::new();
    for (row, sheet_row) in sheet_rows.enumerate() {
        let cells: Vec<Option<String>> = (0..headers.len())
            .map(|i| sheet_row.get(i).and_then(cell_text))
            .collect();
        rows.push(build_transaction(row, &cells, &map)?);
    }

    info!(source = %name, rows = rows.len(), "loaded spreadsheet transactions");
    Ok(TransactionTable::new(rows))
}

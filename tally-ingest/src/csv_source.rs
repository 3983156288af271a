//! CSV operations export (file path or any in-memory reader).

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tally_core::{LedgerError, Result, TransactionTable};
use tracing::info;

use crate::columns::ColumnMap;
use crate::rows::build_transaction;

/// Exports from the bank use `;`, hand-made files usually `,`.
fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains(';') { b';' } else { b',' }
}

/// Load a CSV export from `reader`. `source_name` only labels errors and logs.
pub fn load_csv_reader<R: Read>(reader: R, source_name: &str) -> Result<TransactionTable> {
    let mut reader = BufReader::new(reader);
    let mut header_line = String::new();
    reader
        .read_line(&mut header_line)
        .map_err(|e| LedgerError::load(source_name, e))?;
    if header_line.trim().is_empty() {
        return Err(LedgerError::load(source_name, "source has no header row"));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(&header_line))
        .flexible(true)
        .has_headers(true)
        .from_reader(header_line.as_bytes().chain(reader));

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| LedgerError::load(source_name, e))?
        .iter()
        .map(str::to_string)
        .collect();
    let map = ColumnMap::from_headers(&headers, source_name)?;

    let mut rows = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| LedgerError::load(source_name, e))?;
        let cells: Vec<Option<String>> = (0..headers.len())
            .map(|i| record.get(i).map(str::to_string))
            .collect();
        rows.push(build_transaction(row, &cells, &map)?);
    }

    info!(source = source_name, rows = rows.len(), "loaded CSV transactions");
    Ok(TransactionTable::new(rows))
}

/// Load a CSV export from disk.
pub fn load_csv_path(path: &Path) -> Result<TransactionTable> {
    let name = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| LedgerError::load(&name, e))?;
    load_csv_reader(file, &name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tally_core::Cashback;

    const HEADER: &str = "Дата операции;Дата платежа;Номер карты;Статус;Сумма операции;Валюта операции;Кэшбэк;Категория;MCC;Описание;Сумма операции с округлением";

    #[test]
    fn test_semicolon_export() {
        let data = format!(
            "{HEADER}\n\
             31.12.2021 16:44:00;31.12.2021;*7197;OK;-160,89;RUB;;Супермаркеты;5411;Колхоз;160,89\n\
             31.12.2021 16:42:04;31.12.2021;*7197;OK;-64,00;RUB;1;Супермаркеты;5411;Колхоз;64,00\n"
        );
        let table = load_csv_reader(data.as_bytes(), "inline").unwrap();
        assert_eq!(table.len(), 2);

        let first = table.get(0).unwrap();
        assert_eq!(first.amount, Some(Decimal::new(-16089, 2)));
        assert_eq!(first.amount_rounded, Some(Decimal::new(16089, 2)));
        assert_eq!(first.cashback, Cashback::Absent);
        assert_eq!(first.card_number.as_deref(), Some("*7197"));
        assert_eq!(table.get(1).unwrap().cashback, Cashback::Value(Decimal::ONE));
    }

    #[test]
    fn test_comma_export_with_quotes() {
        let data = "Дата операции,Категория,Сумма операции,Сумма операции с округлением,Номер карты,Кэшбэк,Описание\n\
                    01.08.2023 12:00:00,Еда,\"-1 200,50\",\"1 200,50\",*4556,50,Оплата телефона +7 901 234-56-78\n";
        let table = load_csv_reader(data.as_bytes(), "inline").unwrap();
        let txn = table.get(0).unwrap();
        assert_eq!(txn.amount, Some(Decimal::new(-120050, 2)));
        assert_eq!(
            txn.description.as_deref(),
            Some("Оплата телефона +7 901 234-56-78")
        );
    }

    #[test]
    fn test_missing_column_is_a_load_error() {
        let data = "Дата операции;Категория;Сумма операции\n01.08.2023 12:00:00;Еда;-1\n";
        let err = load_csv_reader(data.as_bytes(), "inline").unwrap_err();
        assert!(err.is_load_error());
    }

    #[test]
    fn test_empty_stream_is_a_load_error() {
        let err = load_csv_reader("".as_bytes(), "inline").unwrap_err();
        assert!(err.is_load_error());
    }

    #[test]
    fn test_header_only_gives_empty_table() {
        let table = load_csv_reader(format!("{HEADER}\n").as_bytes(), "inline").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_csv_path(Path::new("/nonexistent/operations.csv")).unwrap_err();
        assert!(err.is_load_error());
    }
}

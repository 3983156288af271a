//! tally-core: transaction records, date filters, errors and the report observer

pub mod dates;
pub mod error;
pub mod observer;
pub mod transaction;

pub use dates::{DateFilter, parse_cutoff, parse_date, parse_operation_timestamp};
pub use error::{LedgerError, Result};
pub use observer::ReportObserver;
pub use transaction::{Cashback, Transaction, TransactionTable};

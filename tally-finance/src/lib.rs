//! tally-finance: spending analyses over a loaded `TransactionTable`
//!
//! Every analysis is a pure read of the table; nothing here mutates or caches it.

pub mod calendar;
pub mod card;
pub mod cashback;
pub mod category;
pub mod market;
pub mod overview;
pub mod phones;

pub use calendar::{DayType, spend_by_day_type, spend_by_weekday};
pub use card::{CardTotal, total_for_card};
pub use cashback::cashback_by_category;
pub use category::{CategorySpend, search_by_category, spend_by_category};
pub use market::{ConfiguredQuotes, MarketSnapshot, QuoteProvider, RateProvider};
pub use overview::{Overview, greeting, transactions_in_period};
pub use phones::{PhoneExtractor, PhoneMatch, extract_phones, find_transactions_with_phones};

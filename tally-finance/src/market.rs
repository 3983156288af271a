//! Market snapshot from pluggable quote providers.
//!
//! Providers are outside collaborators. Whatever they fail to deliver is
//! simply missing from the snapshot; it never fails an analysis.

use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Currency conversion rates for a set of currency codes
pub trait RateProvider {
    fn latest_rates(&self, currencies: &[String]) -> Result<BTreeMap<String, Decimal>>;
}

/// Latest price for one security symbol
pub trait QuoteProvider {
    fn latest_price(&self, symbol: &str) -> Result<Decimal>;
}

/// Offline provider answering from configured tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredQuotes {
    #[serde(default)]
    pub rates: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub prices: BTreeMap<String, Decimal>,
}

impl RateProvider for ConfiguredQuotes {
    fn latest_rates(&self, currencies: &[String]) -> Result<BTreeMap<String, Decimal>> {
        if self.rates.is_empty() {
            return Err(anyhow!("no currency rates configured"));
        }
        Ok(currencies
            .iter()
            .filter_map(|code| self.rates.get(code).map(|rate| (code.clone(), *rate)))
            .collect())
    }
}

impl QuoteProvider for ConfiguredQuotes {
    fn latest_price(&self, symbol: &str) -> Result<Decimal> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| anyhow!("no price configured for {symbol}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketSnapshot {
    /// `None` when the rate provider is unavailable
    pub currency_rates: Option<BTreeMap<String, Decimal>>,
    /// Only symbols whose quote succeeded
    pub stock_prices: BTreeMap<String, Decimal>,
}

impl MarketSnapshot {
    pub fn collect(
        rates: &dyn RateProvider,
        quotes: &dyn QuoteProvider,
        currencies: &[String],
        symbols: &[String],
    ) -> Self {
        let currency_rates = match rates.latest_rates(currencies) {
            Ok(found) => {
                let missing: Vec<&str> = currencies
                    .iter()
                    .filter(|c| !found.contains_key(*c))
                    .map(String::as_str)
                    .collect();
                if !missing.is_empty() {
                    warn!(missing = %missing.join(", "), "some currencies have no rate");
                }
                Some(found)
            }
            Err(e) => {
                warn!(error = %e, "currency rates unavailable");
                None
            }
        };

        let mut stock_prices = BTreeMap::new();
        for symbol in symbols {
            match quotes.latest_price(symbol) {
                Ok(price) => {
                    stock_prices.insert(symbol.clone(), price);
                }
                Err(e) => warn!(symbol = %symbol, error = %e, "stock price unavailable"),
            }
        }

        info!(
            rates = currency_rates.as_ref().map_or(0, BTreeMap::len),
            prices = stock_prices.len(),
            "market snapshot collected"
        );
        Self {
            currency_rates,
            stock_prices,
        }
    }
}

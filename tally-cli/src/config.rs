use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tally_core::ReportObserver;
use tally_finance::ConfiguredQuotes;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub reports: ReportsSection,
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub market: MarketSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSection {
    /// Operations export read when `--file` is not given
    pub path: PathBuf,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("operations.csv"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportsSection {
    /// Directory for `<report>.json` side files; unset disables them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persist_dir: Option<PathBuf>,
}

impl ReportsSection {
    pub fn observer(&self) -> ReportObserver {
        match &self.persist_dir {
            Some(dir) => ReportObserver::persisting_to(dir),
            None => ReportObserver::logging_only(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// `EnvFilter` directive used when neither `RUST_LOG` nor `--verbose` is set
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSection {
    #[serde(default)]
    pub currencies: Vec<String>,
    #[serde(default)]
    pub stocks: Vec<String>,
    #[serde(default)]
    pub rates: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub prices: BTreeMap<String, Decimal>,
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            currencies: vec!["USD".to_string(), "EUR".to_string()],
            stocks: vec!["AAPL".to_string(), "AMZN".to_string()],
            rates: BTreeMap::new(),
            prices: BTreeMap::new(),
        }
    }
}

impl MarketSection {
    pub fn quotes(&self) -> ConfiguredQuotes {
        ConfiguredQuotes {
            rates: self.rates.clone(),
            prices: self.prices.clone(),
        }
    }
}

/// Read the config at `path`; a missing file means defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

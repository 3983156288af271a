use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use tally_core::{ReportObserver, TransactionTable, parse_cutoff, parse_date, parse_operation_timestamp};
use tally_finance::{MarketSnapshot, Overview};

mod config;
mod observability;
mod state;

use config::Config;
use observability::Observability;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    long_version = LONG_VERSION,
    about = "Spending reports over a bank operations export"
)]
struct Cli {
    /// Config file (default: ~/.tally/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Operations export to read, overriding source.path
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Total spend of one category up to a date
    Category {
        #[arg(long)]
        name: String,
        /// DD.MM.YYYY (end of day) or DD.MM.YYYY HH:MM:SS
        #[arg(long, value_parser = cutoff_arg)]
        until: NaiveDateTime,
    },

    /// Transactions whose category contains the query, ignoring case
    Search {
        #[arg(long)]
        query: String,
    },

    /// Spend per weekday (Monday = 0) up to a date
    Weekdays {
        #[arg(long, value_parser = cutoff_arg)]
        until: NaiveDateTime,
    },

    /// Spend on workdays vs weekends up to a date
    DayTypes {
        #[arg(long, value_parser = cutoff_arg)]
        until: NaiveDateTime,
    },

    /// Cashback per category for one month
    Cashback {
        #[arg(long)]
        year: i32,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },

    /// Rounded total of one card's operations
    Card {
        /// Masked card number, e.g. *4556
        #[arg(long)]
        number: String,
    },

    /// Transactions mentioning phone numbers
    Phones,

    /// Greeting, one month of transactions from a date, and market quotes
    Overview {
        #[arg(long, value_parser = start_arg)]
        from: NaiveDate,
        /// Hour used for the greeting (default: current local hour)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
        hour: Option<u32>,
    },

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config unless one exists
    Init,
    /// Print the effective config
    Show,
}

fn cutoff_arg(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    parse_cutoff(raw).map_err(|_| format!("expected DD.MM.YYYY or DD.MM.YYYY HH:MM:SS, got {raw:?}"))
}

fn start_arg(raw: &str) -> std::result::Result<NaiveDate, String> {
    parse_operation_timestamp(raw)
        .map(|ts| ts.date())
        .or_else(|| parse_date(raw).ok())
        .ok_or_else(|| format!("expected DD.MM.YYYY, got {raw:?}"))
}

fn main() -> Result<()> {
    let Cli {
        config,
        file,
        verbose,
        command,
    } = Cli::parse();

    let config_path = match config {
        Some(p) => p,
        None => state::default_config_path()?,
    };
    let cfg = config::load_config(&config_path)?;
    let _observability = Observability::init(&cfg.logging, verbose)?;

    match command {
        Command::Config { command } => match command {
            ConfigCommand::Init => {
                if config_path == state::default_config_path()? {
                    state::ensure_tally_home()?;
                }
                config::init_config(&config_path)?;
            }
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
        command => {
            let source = file.unwrap_or_else(|| cfg.source.path.clone());
            let table = load_table(&source)?;
            let json = run_report(&cfg, &table, command)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn load_table(source: &Path) -> Result<TransactionTable> {
    tally_ingest::load_path(source).with_context(|| format!("loading {}", source.display()))
}

fn run_report(cfg: &Config, table: &TransactionTable, command: Command) -> Result<String> {
    let observer = cfg.reports.observer();

    match command {
        Command::Category { name, until } => observed(
            &observer,
            "category",
            &format!("name={name} until={until}"),
            || Ok::<_, Infallible>(tally_finance::spend_by_category(table, &name, until)),
        ),
        Command::Search { query } => observed(&observer, "search", &format!("query={query}"), || {
            Ok::<_, Infallible>(tally_finance::search_by_category(table, &query))
        }),
        Command::Weekdays { until } => observed(&observer, "weekdays", &format!("until={until}"), || {
            Ok::<_, Infallible>(tally_finance::spend_by_weekday(table, until))
        }),
        Command::DayTypes { until } => observed(&observer, "day_types", &format!("until={until}"), || {
            Ok::<_, Infallible>(tally_finance::spend_by_day_type(table, until))
        }),
        Command::Cashback { year, month } => observed(
            &observer,
            "cashback",
            &format!("year={year} month={month}"),
            || tally_finance::cashback_by_category(table, year, month),
        ),
        Command::Card { number } => observed(&observer, "card", &format!("number={number}"), || {
            Ok::<_, Infallible>(tally_finance::total_for_card(table, &number))
        }),
        Command::Phones => observed(&observer, "phones", "", || {
            tally_finance::find_transactions_with_phones(table)
        }),
        Command::Overview { from, hour } => {
            let hour = hour.unwrap_or_else(|| Local::now().hour());
            let quotes = cfg.market.quotes();
            observed(&observer, "overview", &format!("from={from} hour={hour}"), || {
                let market = MarketSnapshot::collect(&quotes, &quotes, &cfg.market.currencies, &cfg.market.stocks);
                Ok::<_, Infallible>(Overview::build(table, from, hour, market))
            })
        }
        Command::Config { .. } => bail!("config commands do not produce a report"),
    }
}

/// Run one analysis under the observer and render it as pretty JSON.
fn observed<T, E, F>(observer: &ReportObserver, report: &str, params: &str, analysis: F) -> Result<String>
where
    T: Serialize,
    E: std::error::Error + Send + Sync + 'static,
    F: FnOnce() -> std::result::Result<T, E>,
{
    let value = observer
        .observe(report, params, analysis)
        .with_context(|| format!("{report} report failed"))?;
    serde_json::to_string_pretty(&value).context("serialize report")
}

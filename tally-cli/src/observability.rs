//! Logging setup for one CLI run.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LoggingSection;

/// Installed subscriber; logging stops when this is dropped.
pub struct Observability {
    _guard: DefaultGuard,
}

impl Observability {
    pub fn init(settings: &LoggingSection, verbose: bool) -> Result<Self> {
        let filter = build_filter(
            std::env::var("RUST_LOG").ok().as_deref(),
            verbose,
            &settings.level,
        )?;

        let file_layer = match &settings.file {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("open log file {}", path.display()))?;
                Some(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(false)
                        .with_writer(Mutex::new(file)),
                )
            }
            None => None,
        };

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .with(file_layer);

        Ok(Self {
            _guard: tracing::subscriber::set_default(subscriber),
        })
    }
}

/// Priority: RUST_LOG > --verbose > configured level.
fn build_filter(rust_log: Option<&str>, verbose: bool, level: &str) -> Result<EnvFilter> {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        return EnvFilter::try_new(directives).context("parse RUST_LOG");
    }
    if verbose {
        return Ok(EnvFilter::new("debug"));
    }
    EnvFilter::try_new(level).with_context(|| format!("parse logging.level {level:?}"))
}

//! Report observer: wraps an analysis call, logs it and optionally writes
//! the result next to previous reports.

use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Logs every observed report and, when a directory is configured,
/// persists its JSON form as `<dir>/<report>.json`.
#[derive(Debug, Clone, Default)]
pub struct ReportObserver {
    persist_dir: Option<PathBuf>,
}

impl ReportObserver {
    /// Observer that only logs.
    pub fn logging_only() -> Self {
        Self::default()
    }

    pub fn persisting_to(dir: impl Into<PathBuf>) -> Self {
        Self {
            persist_dir: Some(dir.into()),
        }
    }

    pub fn persist_dir(&self) -> Option<&Path> {
        self.persist_dir.as_deref()
    }

    /// Run `analysis` under the observer.
    ///
    /// The analysis result is returned untouched; a failed write is logged.
    pub fn observe<T, E, F>(&self, report: &str, params: &str, analysis: F) -> Result<T, E>
    where
        T: Serialize,
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        info!(report, params, "running report");
        let outcome = analysis();
        match &outcome {
            Ok(value) => {
                match serde_json::to_string(value) {
                    Ok(json) => debug!(report, result = %json, "report finished"),
                    Err(e) => warn!(report, error = %e, "report result is not serializable"),
                }
                if let Some(dir) = &self.persist_dir {
                    if let Err(e) = write_report(dir, report, value) {
                        warn!(report, dir = %dir.display(), error = %e, "could not persist report");
                    }
                }
            }
            Err(e) => warn!(report, error = %e, "report failed"),
        }
        outcome
    }
}

fn write_report<T: Serialize>(dir: &Path, report: &str, value: &T) -> crate::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{report}.json"));
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&path, format!("{json}\n"))?;
    debug!(path = %path.display(), "report written");
    Ok(path)
}

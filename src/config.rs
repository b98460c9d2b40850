use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::analytics::DEFAULT_TREND_WINDOW;

pub(crate) const DATA_DIR_ENV: &str = "FINANCEFLOW_DATA_DIR";
pub(crate) const TREND_WINDOW_ENV: &str = "FINANCEFLOW_TREND_WINDOW";
pub(crate) const LOG_ENV: &str = "FINANCEFLOW_LOG";

const DB_FILE: &str = "financeflow.db";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub data_dir: PathBuf,
    pub trend_window: usize,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::resolve(
            std::env::var(DATA_DIR_ENV).ok(),
            std::env::var(TREND_WINDOW_ENV).ok(),
        )
    }

    fn resolve(data_dir: Option<String>, trend_window: Option<String>) -> Result<Self> {
        let data_dir = match data_dir.filter(|d| !d.trim().is_empty()) {
            Some(dir) => PathBuf::from(crate::run::cli::shellexpand(&dir)),
            None => default_data_dir()?,
        };

        let trend_window = match trend_window {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, var = TREND_WINDOW_ENV, "invalid trend window, using default");
                DEFAULT_TREND_WINDOW
            }),
            None => DEFAULT_TREND_WINDOW,
        };

        Ok(Self {
            data_dir,
            trend_window,
        })
    }

    /// Create the data directory if needed and return the database path.
    pub(crate) fn db_path(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })?;
        Ok(self.data_dir.join(DB_FILE))
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "financeflow", "FinanceFlow")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

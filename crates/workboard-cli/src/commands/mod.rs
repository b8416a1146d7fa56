pub mod config;
pub mod leaderboard;
pub mod quote;
pub mod summary;
pub mod workload;

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Args;
use workboard_core::{parse_date, Config, DateFilter, Snapshot};

/// Settings shared by every command.
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub now: NaiveDateTime,
}

impl Context {
    pub fn config_path(&self) -> workboard_core::Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Config::default_path(),
        }
    }

    pub fn load_config(&self) -> workboard_core::Result<Config> {
        let path = self.config_path()?;
        tracing::debug!(path = %path.display(), now = %self.now, "loading config");
        Config::load_from(&path)
    }
}

/// Snapshot files exported by the data layer.
#[derive(Args)]
pub struct SnapshotArgs {
    /// JSON array of users
    #[arg(long)]
    pub users: PathBuf,
    /// JSON array of tasks
    #[arg(long)]
    pub tasks: PathBuf,
}

impl SnapshotArgs {
    pub fn load(&self) -> workboard_core::Result<Snapshot> {
        Snapshot::load(&self.users, &self.tasks)
    }
}

/// Dashboard date filter.
#[derive(Args)]
pub struct FilterArgs {
    /// all, today, week, month or custom (defaults to the configured filter)
    #[arg(long)]
    pub filter: Option<String>,
    /// First day of a custom range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    pub from: Option<NaiveDate>,
    /// Last day of a custom range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn resolve(&self, config: &Config) -> Result<DateFilter, Box<dyn std::error::Error>> {
        match &self.filter {
            Some(mode) => Ok(DateFilter::from_mode(mode, self.from, self.to)?),
            None => match config.default_filter()? {
                DateFilter::Custom { .. } => Ok(DateFilter::Custom {
                    start: self.from,
                    end: self.to,
                }),
                other => Ok(other),
            },
        }
    }
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

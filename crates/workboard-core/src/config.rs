//! TOML-based application configuration.
//!
//! Stores:
//! - Scoring thresholds (upcoming-deadline window, high performer cut-off)
//! - Default dashboard filter and leaderboard period
//! - Daily quote source and refresh policy
//!
//! Configuration is stored at `~/.config/workboard/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::motivation::QuotePolicy;
use crate::period::{DateFilter, LeaderboardPeriod};
use crate::workload::ScoringOptions;

/// Scoring thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_upcoming_deadline_days")]
    pub upcoming_deadline_days: u32,
    #[serde(default = "default_high_performer_threshold")]
    pub high_performer_threshold: u8,
}

/// Defaults applied when the CLI is not told otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_period")]
    pub period: String,
}

/// Daily motivation quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default = "default_true")]
    pub daily_refresh: bool,
    /// Remote quote endpoint. Empty means built-in quotes only.
    #[serde(default = "default_quote_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/workboard/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub quote: QuoteConfig,
}

/// Longest upcoming-deadline window accepted from configuration.
pub const MAX_UPCOMING_DEADLINE_DAYS: u32 = 3650;

fn default_upcoming_deadline_days() -> u32 {
    3
}
fn default_high_performer_threshold() -> u8 {
    60
}
fn default_filter() -> String {
    "all".into()
}
fn default_period() -> String {
    "week".into()
}
fn default_true() -> bool {
    true
}
fn default_quote_url() -> String {
    "https://api.quotable.io/random".into()
}
fn default_timeout_secs() -> u64 {
    5
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            upcoming_deadline_days: default_upcoming_deadline_days(),
            high_performer_threshold: default_high_performer_threshold(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            period: default_period(),
        }
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            daily_refresh: true,
            url: default_quote_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Returns `~/.config/workboard[-dev]/` based on WORKBOARD_ENV.
///
/// Set WORKBOARD_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WORKBOARD_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("workboard-dev")
    } else {
        base_dir.join("workboard")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if part.is_empty() {
                return Err(unknown());
            }
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(unknown());
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from `path`, writing a default file first if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the default file cannot be written.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(path)?;
            return Ok(cfg);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse as
    /// the key's type or fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.scoring.high_performer_threshold > 100 {
            return Err(ConfigError::InvalidValue {
                key: "scoring.high_performer_threshold".to_string(),
                message: "must be between 0 and 100".to_string(),
            });
        }
        if self.scoring.upcoming_deadline_days > MAX_UPCOMING_DEADLINE_DAYS {
            return Err(ConfigError::InvalidValue {
                key: "scoring.upcoming_deadline_days".to_string(),
                message: format!("must be at most {MAX_UPCOMING_DEADLINE_DAYS}"),
            });
        }
        self.default_filter()?;
        self.default_period()?;
        Ok(())
    }

    pub fn scoring_options(&self) -> ScoringOptions {
        ScoringOptions {
            upcoming_deadline_days: self.scoring.upcoming_deadline_days,
            high_performer_threshold: self.scoring.high_performer_threshold,
        }
    }

    pub fn default_filter(&self) -> std::result::Result<DateFilter, ConfigError> {
        self.defaults
            .filter
            .parse()
            .map_err(|e: crate::error::ValidationError| ConfigError::InvalidValue {
                key: "defaults.filter".to_string(),
                message: e.to_string(),
            })
    }

    pub fn default_period(&self) -> std::result::Result<LeaderboardPeriod, ConfigError> {
        self.defaults
            .period
            .parse()
            .map_err(|e: crate::error::ValidationError| ConfigError::InvalidValue {
                key: "defaults.period".to_string(),
                message: e.to_string(),
            })
    }

    pub fn quote_policy(&self) -> QuotePolicy {
        QuotePolicy {
            daily_refresh: self.quote.daily_refresh,
        }
    }

    pub fn quote_timeout(&self) -> Duration {
        Duration::from_secs(self.quote.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.scoring.upcoming_deadline_days, 3);
        assert_eq!(parsed.scoring.high_performer_threshold, 60);
        assert_eq!(parsed.defaults.period, "week");
        assert!(parsed.quote.daily_refresh);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[scoring]\nhigh_performer_threshold = 70\n").unwrap();
        assert_eq!(parsed.scoring.high_performer_threshold, 70);
        assert_eq!(parsed.scoring.upcoming_deadline_days, 3);
        assert_eq!(parsed.defaults.filter, "all");
    }

    #[test]
    fn get_and_set_by_dotted_key() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get("scoring.high_performer_threshold").as_deref(), Some("60"));
        assert_eq!(cfg.get("defaults.filter").as_deref(), Some("all"));
        assert_eq!(cfg.get("nope"), None);

        cfg.set("scoring.upcoming_deadline_days", "5").unwrap();
        cfg.set("quote.daily_refresh", "false").unwrap();
        cfg.set("defaults.period", "month").unwrap();
        assert_eq!(cfg.scoring_options().upcoming_deadline_days, 5);
        assert!(!cfg.quote_policy().daily_refresh);
        assert_eq!(cfg.default_period().unwrap(), LeaderboardPeriod::Month);
    }

    #[test]
    fn set_rejects_bad_input() {
        let mut cfg = Config::default();
        assert!(cfg.set("scoring.missing", "1").is_err());
        assert!(cfg.set("scoring", "1").is_err());
        assert!(cfg.set("quote.daily_refresh", "maybe").is_err());
        assert!(cfg.set("scoring.high_performer_threshold", "101").is_err());
        assert!(cfg.set("scoring.high_performer_threshold", "300").is_err());
        assert!(cfg.set("defaults.filter", "fortnight").is_err());
        assert!(cfg.set("scoring.upcoming_deadline_days", "4000000000").is_err());
        assert!(cfg.set("scoring.upcoming_deadline_days", "3651").is_err());
        // Failed sets leave the config untouched.
        assert_eq!(cfg.scoring.upcoming_deadline_days, 3);
        assert_eq!(cfg.scoring.high_performer_threshold, 60);
        assert_eq!(cfg.defaults.filter, "all");
    }

    #[test]
    fn load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.scoring.high_performer_threshold, 60);

        let mut cfg = cfg;
        cfg.set("scoring.high_performer_threshold", "75").unwrap();
        cfg.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.scoring.high_performer_threshold, 75);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "scoring = 'oops'").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }
}

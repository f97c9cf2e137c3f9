use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::seats::DEFAULT_SEATS;

pub const MAX_SEATS: usize = 10;

/// Table settings a game is created with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    /// Seat ring capacity
    pub seats: usize,
    /// Small blind and post-flop minimum raise; the big blind is twice this
    pub min_bet: u32,
    /// Stack given to players seated without an explicit amount
    pub starting_chips: u32,
    /// Seed for reproducible shuffles; entropy when absent
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seats: DEFAULT_SEATS,
            min_bet: 5,
            starting_chips: 500,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub seats: ValueSource,
    pub min_bet: ValueSource,
    pub starting_chips: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seats: ValueSource::Default,
            min_bet: ValueSource::Default,
            starting_chips: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: TableConfig,
    pub sources: ConfigSources,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";

impl TableConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_SEATS).contains(&self.seats) {
            return Err(ConfigError::Invalid(format!(
                "seats must be between 2 and {MAX_SEATS}"
            )));
        }
        if self.min_bet == 0 {
            return Err(ConfigError::Invalid("min_bet must be >0".into()));
        }
        if self.starting_chips < self.min_bet.saturating_mul(2) {
            return Err(ConfigError::Invalid(
                "starting_chips must cover the big blind".into(),
            ));
        }
        Ok(())
    }
}

/// Defaults, then the TOML file named by `HOLDEM_CONFIG`, then
/// `HOLDEM_SEATS` / `HOLDEM_MIN_BET` / `HOLDEM_STARTING_CHIPS` /
/// `HOLDEM_SEED`.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = TableConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seats {
            cfg.seats = v;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = f.min_bet {
            cfg.min_bet = v;
            sources.min_bet = ValueSource::File;
        }
        if let Some(v) = f.starting_chips {
            cfg.starting_chips = v;
            sources.starting_chips = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(v) = env_value("HOLDEM_SEATS")? {
        cfg.seats = v;
        sources.seats = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_MIN_BET")? {
        cfg.min_bet = v;
        sources.min_bet = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_STARTING_CHIPS")? {
        cfg.starting_chips = v;
        sources.starting_chips = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }

    cfg.validate()?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

pub fn load() -> Result<TableConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

fn env_value<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.is_empty() => v
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {name}: {v:?}"))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seats: Option<usize>,
    #[serde(default)]
    min_bet: Option<u32>,
    #[serde(default)]
    starting_chips: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
}

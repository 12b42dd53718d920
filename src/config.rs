//! Runtime configuration.
//!
//! Tunables for the surrounding game loop and the progress store. Values that
//! decide puzzle content (sampling cap, seed prefix, region order, rounds per
//! day) are constants elsewhere and deliberately not configurable.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable holds an unusable value.
    #[error("invalid value {value:?} for {var}")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Game loop configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Endless sessions end once this many rounds are confirmed.
    pub endless_round_limit: usize,
    /// Search radius for imagery coverage around a target (meters).
    pub coverage_radius_m: f64,
    /// Regenerations attempted before giving up on a round's coverage.
    pub max_coverage_retries: u32,
    /// A lookup taking longer than this counts as no coverage.
    pub coverage_timeout: Duration,
    /// Per-round time limit in hard mode.
    pub hard_mode_time_limit: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            endless_round_limit: 11,
            coverage_radius_m: 1000.0,
            max_coverage_retries: 10,
            coverage_timeout: Duration::from_secs(5),
            hard_mode_time_limit: Duration::from_secs(60),
        }
    }
}

impl GameConfig {
    /// Defaults overridden by `NEWYAWKR_ENDLESS_ROUNDS` and
    /// `NEWYAWKR_COVERAGE_RETRIES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(rounds) = env_parse::<usize>("NEWYAWKR_ENDLESS_ROUNDS")? {
            config.endless_round_limit = rounds;
        }
        if let Some(retries) = env_parse::<u32>("NEWYAWKR_COVERAGE_RETRIES")? {
            config.max_coverage_retries = retries;
        }
        Ok(config)
    }
}

/// Progress store configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Directory holding the progress file.
    pub data_dir: PathBuf,
    /// Record key (file stem).
    pub key: String,
    /// Quiet period before a pending save is written.
    pub save_debounce: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".newyawkr"),
            key: "newyawkr-daily-progress".to_string(),
            save_debounce: Duration::from_millis(100),
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by `NEWYAWKR_DATA_DIR` and
    /// `NEWYAWKR_SAVE_DEBOUNCE_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("NEWYAWKR_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(ms) = env_parse::<u64>("NEWYAWKR_SAVE_DEBOUNCE_MS")? {
            config.save_debounce = Duration::from_millis(ms);
        }
        Ok(config)
    }
}

fn env_parse<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(None),
    }
}

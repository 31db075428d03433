//! Configuration loading for the engagement engine.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.engagement/config.toml`)
//! 3. User config (`~/.engagement/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. The engine runs with sensible defaults
//! when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngagementError, Result};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where the file-backed stores live.
    pub store: StoreConfig,
    /// Batch aggregation limits.
    pub batch: BatchConfig,
    /// Leaderboard rendering defaults.
    pub leaderboard: LeaderboardConfig,
}

/// File store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory containing `memes.json` and `profiles/`.
    ///
    /// `None` resolves to `<engagement_home>/data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Batch request limits applied by callers of the batch aggregator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum number of distinct users in one leaderboard request.
    pub max_users: usize,
}

/// Minimum valid `max_users` value.
pub const MIN_BATCH_USERS: usize = 1;

/// Default batch cap, matching the leaderboard page size.
pub const DEFAULT_BATCH_USERS: usize = 1000;

impl BatchConfig {
    /// Check if a `max_users` value is valid (must be >= 1).
    pub fn is_valid_max_users(value: usize) -> bool {
        value >= MIN_BATCH_USERS
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_users: DEFAULT_BATCH_USERS,
        }
    }
}

/// Valid values for the leaderboard metric field.
pub const VALID_METRICS: &[&str] = &["memes", "comments", "likes", "comments-received"];

/// Leaderboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Number of rows shown when `--limit` is not given.
    pub default_limit: usize,
    /// Metric used when `--metric` is not given.
    pub default_metric: String,
}

impl LeaderboardConfig {
    /// Check if a metric value is valid.
    pub fn is_valid_metric(value: &str) -> bool {
        VALID_METRICS.contains(&value)
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            default_metric: "likes".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// Never fails: unreadable or invalid config files are skipped.
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Load user config from `<engagement_home>/config.toml`.
    fn load_user_config() -> Option<Config> {
        let home = engagement_home()?;
        Self::load_from_file(&home.join("config.toml")).ok()
    }

    /// Load project config from `.engagement/config.toml` in the given directory.
    fn load_project_config(cwd: &Path) -> Option<Config> {
        let config_path = cwd.join(".engagement").join("config.toml");
        Self::load_from_file(&config_path).ok()
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| EngagementError::storage(path, e))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| EngagementError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the engine misbehave.
    pub fn validate(&self) -> Result<()> {
        if !BatchConfig::is_valid_max_users(self.batch.max_users) {
            return Err(EngagementError::config(format!(
                "batch.max_users must be >= {}, got {}",
                MIN_BATCH_USERS, self.batch.max_users
            )));
        }
        if !LeaderboardConfig::is_valid_metric(&self.leaderboard.default_metric) {
            return Err(EngagementError::config(format!(
                "leaderboard.default_metric must be one of {:?}, got '{}'",
                VALID_METRICS, self.leaderboard.default_metric
            )));
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // ENGAGEMENT_DATA_DIR
        if let Ok(val) = env::var("ENGAGEMENT_DATA_DIR") {
            if val.is_empty() {
                tracing::warn!("ENGAGEMENT_DATA_DIR is empty, ignoring");
            } else {
                self.store.data_dir = Some(PathBuf::from(val));
            }
        }

        // ENGAGEMENT_MAX_BATCH_USERS
        if let Ok(val) = env::var("ENGAGEMENT_MAX_BATCH_USERS") {
            match val.parse::<usize>() {
                Ok(n) if BatchConfig::is_valid_max_users(n) => self.batch.max_users = n,
                _ => tracing::warn!(
                    "Invalid ENGAGEMENT_MAX_BATCH_USERS value '{}'. \
                    Expected an integer >= {}. Keeping '{}'.",
                    val,
                    MIN_BATCH_USERS,
                    self.batch.max_users
                ),
            }
        }

        // ENGAGEMENT_LEADERBOARD_LIMIT
        if let Ok(val) = env::var("ENGAGEMENT_LEADERBOARD_LIMIT") {
            match val.parse::<usize>() {
                Ok(n) => self.leaderboard.default_limit = n,
                Err(_) => tracing::warn!(
                    "Invalid ENGAGEMENT_LEADERBOARD_LIMIT value '{}'. \
                    Expected a positive integer. Keeping '{}'.",
                    val,
                    self.leaderboard.default_limit
                ),
            }
        }
    }

    /// Merge another config into this one.
    ///
    /// Values from `other` win wherever they differ from the defaults.
    fn merge(mut self, other: Config) -> Self {
        if other.store.data_dir.is_some() {
            self.store.data_dir = other.store.data_dir;
        }

        let default_batch = BatchConfig::default();
        if other.batch.max_users != default_batch.max_users {
            self.batch.max_users = other.batch.max_users;
        }

        let default_board = LeaderboardConfig::default();
        if other.leaderboard.default_limit != default_board.default_limit {
            self.leaderboard.default_limit = other.leaderboard.default_limit;
        }
        if other.leaderboard.default_metric != default_board.default_metric {
            self.leaderboard.default_metric = other.leaderboard.default_metric;
        }

        self
    }

    /// Resolve the data directory, falling back to `<engagement_home>/data`.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.store
            .data_dir
            .clone()
            .or_else(|| engagement_home().map(|h| h.join("data")))
    }
}

/// Get the engagement home directory.
///
/// `$ENGAGEMENT_HOME` when set and non-empty, otherwise `~/.engagement`.
pub fn engagement_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("ENGAGEMENT_HOME") {
        if home.is_empty() {
            tracing::warn!("ENGAGEMENT_HOME is empty, using default");
        } else {
            return Some(PathBuf::from(home));
        }
    }

    dirs::home_dir().map(|home| home.join(".engagement"))
}

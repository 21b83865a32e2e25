use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_WATCHLIST_KEY: &str = "list";

/// Environment variable that overrides `tmdb.api_key`
pub const API_KEY_ENV: &str = "MARQUEE_TMDB_API_KEY";

const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TMDB api_key is not configured (set it in config.toml or MARQUEE_TMDB_API_KEY)")]
    MissingApiKey,
    #[error("TMDB {field} must be an http(s) URL, got '{value}'")]
    InvalidUrl { field: &'static str, value: String },
    #[error("watchlist key cannot be empty")]
    EmptyWatchlistKey,
    #[error("watchlist key '{0}' may only use letters, digits, '-', '_' and '.' and cannot start with '.'")]
    InvalidWatchlistKey(String),
}

/// Keys the file store accepts: they name a file directly under the store dir
pub fn is_valid_store_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub watchlist: WatchlistConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistConfig {
    /// Key the watchlist is persisted under
    #[serde(default = "default_watchlist_key")]
    pub key: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_watchlist_key() -> String {
    DEFAULT_WATCHLIST_KEY.to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
        }
    }
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            key: default_watchlist_key(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
    }

    /// Replace the configured key when a non-blank override is given
    pub fn apply_api_key_override(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            debug!("Using TMDB api_key from {}", API_KEY_ENV);
            self.tmdb.api_key = key;
        }
    }

    pub fn is_tmdb_configured(&self) -> bool {
        let key = self.tmdb.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_tmdb_configured() {
            return Err(ConfigError::MissingApiKey);
        }

        for (field, value) in [("base_url", &self.tmdb.base_url), ("image_base_url", &self.tmdb.image_base_url)] {
            if !(value.starts_with("https://") || value.starts_with("http://")) {
                return Err(ConfigError::InvalidUrl { field, value: value.clone() });
            }
        }

        self.validate_watchlist()
    }

    /// Watchlist checks alone, for commands that never reach the catalog
    pub fn validate_watchlist(&self) -> Result<(), ConfigError> {
        let key = &self.watchlist.key;
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyWatchlistKey);
        }
        if !is_valid_store_key(key) {
            return Err(ConfigError::InvalidWatchlistKey(key.clone()));
        }
        Ok(())
    }

    /// Starter file written by `marquee config init`
    pub fn template() -> Self {
        let mut config = Self::default();
        config.tmdb.api_key = PLACEHOLDER_API_KEY.to_string();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn configured() -> Config {
        let mut config = Config::default();
        config.tmdb.api_key = "abc123".to_string();
        config
    }

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut config = configured();
        config.watchlist.key = "favorites".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.tmdb.api_key, "abc123");
        assert_eq!(loaded.tmdb.base_url, DEFAULT_BASE_URL);
        assert_eq!(loaded.watchlist.key, "favorites");
    }

    #[test]
    fn test_partial_file_gets_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[tmdb]\napi_key = \"k\"\n").unwrap();

        let loaded = Config::load_from_file(&file.path().to_path_buf()).unwrap();
        assert_eq!(loaded.tmdb.api_key, "k");
        assert_eq!(loaded.tmdb.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert_eq!(loaded.tmdb.language, DEFAULT_LANGUAGE);
        assert_eq!(loaded.watchlist.key, DEFAULT_WATCHLIST_KEY);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let path = PathBuf::from("/nonexistent/marquee/config.toml");
        let config = Config::load_or_default(&path).unwrap();
        assert!(!config.is_tmdb_configured());
    }

    #[test]
    fn test_config_validate() {
        assert_eq!(Config::default().validate(), Err(ConfigError::MissingApiKey));
        assert_eq!(Config::template().validate(), Err(ConfigError::MissingApiKey));
        assert!(configured().validate().is_ok());

        let mut bad_url = configured();
        bad_url.tmdb.base_url = "api.themoviedb.org/3".to_string();
        assert!(matches!(bad_url.validate(), Err(ConfigError::InvalidUrl { field: "base_url", .. })));

        let mut empty_key = configured();
        empty_key.watchlist.key = "  ".to_string();
        assert_eq!(empty_key.validate(), Err(ConfigError::EmptyWatchlistKey));
    }

    #[test]
    fn test_watchlist_key_must_name_a_store_file() {
        for key in ["my list", "a/b", ".hidden", "../escape"] {
            let mut config = configured();
            config.watchlist.key = key.to_string();
            assert_eq!(config.validate(), Err(ConfigError::InvalidWatchlistKey(key.to_string())), "key {:?}", key);
            // No API key needed for the watchlist-only check
            config.tmdb.api_key.clear();
            assert!(config.validate_watchlist().is_err());
        }

        let mut config = Config::default();
        config.watchlist.key = "favorites-2026.v1".to_string();
        assert!(config.validate_watchlist().is_ok());
    }

    #[test]
    fn test_api_key_override() {
        let mut config = configured();
        config.apply_api_key_override(Some("  ".to_string()));
        assert_eq!(config.tmdb.api_key, "abc123");

        config.apply_api_key_override(None);
        assert_eq!(config.tmdb.api_key, "abc123");

        config.apply_api_key_override(Some(" from-env ".to_string()));
        assert_eq!(config.tmdb.api_key, "from-env");
    }
}

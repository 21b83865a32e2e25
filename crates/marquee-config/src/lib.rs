pub mod config;
pub mod paths;

pub use config::{is_valid_store_key, Config, ConfigError, TmdbConfig, WatchlistConfig, API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_WATCHLIST_KEY};
pub use paths::{PathManager, container_base_path};

pub mod catalog;
pub mod config;
pub mod watchlist;

use color_eyre::eyre::{eyre, Result, WrapErr};
use marquee_config::{Config, PathManager, API_KEY_ENV};
use marquee_sources::TmdbClient;
use tracing::debug;

/// Config file plus environment overrides, validated for catalog use
pub(crate) fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config.apply_env_overrides();

    config.validate().map_err(|e| {
        eyre!(
            "{}\nSet {} or run 'marquee config init --api-key <KEY>' (config file: {})",
            e,
            API_KEY_ENV,
            config_file.display()
        )
    })?;

    debug!("Loaded config from {}", config_file.display());
    Ok(config)
}

pub(crate) fn tmdb_client(config: &Config) -> Result<TmdbClient> {
    TmdbClient::from_config(&config.tmdb)
        .map_err(|e| eyre!("{}", e))
        .wrap_err("Failed to create TMDB client")
}

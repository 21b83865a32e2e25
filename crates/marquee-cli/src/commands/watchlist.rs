use super::{load_config, tmdb_client};
use crate::output::Output;
use crate::WatchlistCommands;
use color_eyre::eyre::{eyre, Result};
use marquee_config::{Config, PathManager};
use marquee_core::{AddOutcome, FileStore, WatchlistStore};
use marquee_sources::CatalogSource;

pub async fn run_watchlist(cmd: WatchlistCommands, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    match cmd {
        WatchlistCommands::Add { id } => add(&path_manager, &id, output).await,
        WatchlistCommands::List => list(&path_manager, output),
        WatchlistCommands::Remove { id } => remove(&path_manager, id, output),
    }
}

fn open(path_manager: &PathManager, config: &Config) -> WatchlistStore<FileStore> {
    WatchlistStore::with_key(FileStore::from_paths(path_manager), config.watchlist.key.clone())
}

/// Watchlist reads and removals need no API key, only the store location
fn local_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate_watchlist()
        .map_err(|e| eyre!("{} (config file: {})", e, config_file.display()))?;
    Ok(config)
}

async fn add(path_manager: &PathManager, id: &str, output: &Output) -> Result<()> {
    let config = load_config(path_manager)?;
    let client = tmdb_client(&config)?;

    let movie = client
        .movie_by_id(id)
        .await?
        .ok_or_else(|| eyre!("No movie found with id {}", id))?;
    let record = movie.to_display_record(client.image_base_url());
    let title = record.title.clone();

    match open(path_manager, &config).add(record) {
        AddOutcome::Added => output.success(format!("Added '{}' to the watchlist", title)),
        AddOutcome::AlreadyPresent => output.info(format!("'{}' is already on the watchlist", title)),
        AddOutcome::NotPersisted => {
            return Err(eyre!(
                "Could not save the watchlist under {} (run with -v for details)",
                path_manager.store_dir().display()
            ))
        }
    }
    Ok(())
}

fn list(path_manager: &PathManager, output: &Output) -> Result<()> {
    let config = local_config(path_manager)?;
    let records = open(path_manager, &config).list();

    if records.is_empty() && output.format() == crate::output::OutputFormat::Human {
        output.info("The watchlist is empty. Add a movie with 'marquee watchlist add <id>'.");
        return Ok(());
    }
    output.records("Watchlist", &records);
    Ok(())
}

fn remove(path_manager: &PathManager, id: u64, output: &Output) -> Result<()> {
    let config = local_config(path_manager)?;
    if open(path_manager, &config).remove(id) {
        output.success(format!("Removed {} from the watchlist", id));
    } else {
        output.warn(format!("{} is not on the watchlist", id));
    }
    Ok(())
}

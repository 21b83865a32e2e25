use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::{eyre, Result};
use marquee_config::{Config, PathManager, API_KEY_ENV};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    match cmd {
        ConfigCommands::Show { full } => show_config(&path_manager, full, output),
        ConfigCommands::Init { api_key, force } => init_config(&path_manager, api_key, force, output),
        ConfigCommands::Path => {
            match output.format() {
                OutputFormat::Human => println!("{}", path_manager.config_file().display()),
                OutputFormat::Json | OutputFormat::JsonPretty => {
                    output.data(&json!({ "config_file": path_manager.config_file() }))
                }
            }
            Ok(())
        }
    }
}

fn show_config(path_manager: &PathManager, full: bool, output: &Output) -> Result<()> {
    let config_file = path_manager.config_file();
    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Create one with 'marquee config init', or set the API key via the environment.");
    }

    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let from_env = std::env::var(API_KEY_ENV).is_ok_and(|v| !v.trim().is_empty());
    config.apply_env_overrides();

    let api_key = if full { config.tmdb.api_key.clone() } else { mask_string(&config.tmdb.api_key) };
    let api_key_source = if from_env { API_KEY_ENV } else { "config file" };

    if output.format() != OutputFormat::Human {
        output.data(&json!({
            "config_file": config_file,
            "store_dir": path_manager.store_dir(),
            "tmdb": {
                "api_key": api_key,
                "api_key_source": api_key_source,
                "base_url": config.tmdb.base_url,
                "image_base_url": config.tmdb.image_base_url,
                "language": config.tmdb.language,
            },
            "watchlist": { "key": config.watchlist.key },
            "valid": config.validate().is_ok(),
        }));
        return Ok(());
    }

    let status = match config.validate() {
        Ok(()) => "✓".green().to_string(),
        Err(e) => format!("{} {}", "✗".red(), e),
    };
    let rows = [
        ("Config File", config_file.display().to_string()),
        ("Store", path_manager.store_dir().display().to_string()),
        ("API Key", format!("{} ({})", api_key, api_key_source)),
        ("Base URL", config.tmdb.base_url.clone()),
        ("Image Base URL", config.tmdb.image_base_url.clone()),
        ("Language", config.tmdb.language.clone()),
        ("Watchlist Key", config.watchlist.key.clone()),
        ("Status", status),
    ];
    output.fields("Configuration", &rows);
    Ok(())
}

fn init_config(path_manager: &PathManager, api_key: Option<String>, force: bool, output: &Output) -> Result<()> {
    let config_file = path_manager.config_file();
    if config_file.exists() && !force {
        return Err(eyre!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
    }

    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;

    let mut config = Config::template();
    config.apply_api_key_override(api_key);
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote configuration to {}", config_file.display()));
    if !config.is_tmdb_configured() {
        output.info(format!(
            "Edit tmdb.api_key in that file or set {} before querying the catalog.",
            API_KEY_ENV
        ));
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.trim().is_empty() || s == "YOUR_API_KEY" {
        return "<not set>".to_string();
    }
    if s.len() <= 4 {
        return "*".repeat(s.len());
    }
    match (s.get(..2), s.get(s.len() - 2..)) {
        (Some(head), Some(tail)) => format!("{}***{}", head, tail),
        _ => "*".repeat(s.chars().count()),
    }
}

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{catalog, config, watchlist};
use marquee_config::PathManager;
use marquee_sources::ListCategory;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Marquee - Browse movies and TV shows and keep a watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr (`--log-file=PATH`).
    /// Without a PATH, logs go to `logs/marquee.log` under the config directory
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

/// Curated list selector shared by `movies` and `tv`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListArg {
    Popular,
    Trending,
    TopRated,
}

impl From<ListArg> for ListCategory {
    fn from(arg: ListArg) -> Self {
        match arg {
            ListArg::Popular => ListCategory::Popular,
            ListArg::Trending => ListCategory::Trending,
            ListArg::TopRated => ListCategory::TopRated,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List movies (popular, trending or top rated), or discover by genre
    #[command(long_about = "List the first page of a curated movie list. With --genre, list movies of that genre instead; the genre id is passed to the service verbatim.")]
    Movies {
        #[arg(value_enum, default_value = "popular")]
        list: ListArg,

        /// Genre id to discover by (see `marquee genres`)
        #[arg(long, value_name = "ID", conflicts_with = "list")]
        genre: Option<String>,
    },
    /// List TV shows (popular, trending or top rated), or discover by genre
    Tv {
        #[arg(value_enum, default_value = "popular")]
        list: ListArg,

        /// Genre id to discover by (see `marquee genres --tv`)
        #[arg(long, value_name = "ID", conflicts_with = "list")]
        genre: Option<String>,
    },
    /// List the genres the service knows
    Genres {
        /// TV genres instead of movie genres
        #[arg(long, action = ArgAction::SetTrue)]
        tv: bool,
    },
    /// Show details for one movie
    Movie {
        /// Movie id
        id: String,
    },
    /// Print the YouTube trailer URL for a movie
    Trailer {
        /// Movie id
        id: String,
    },
    /// Show popular, trending and top rated lists side by side
    #[command(long_about = "Fetch the popular, trending and top rated lists concurrently and print all three. Fails if any of the three requests fails.")]
    Browse {
        /// TV shows instead of movies
        #[arg(long, action = ArgAction::SetTrue)]
        tv: bool,
    },
    /// Dump the service's configuration document (image sizes, base URLs)
    ServiceConfig,
    /// Manage the local watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// View or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// Look up a movie and add it to the watchlist
    Add {
        /// Movie id
        id: String,
    },
    /// Show the watchlist
    List,
    /// Remove a movie from the watchlist
    Remove {
        /// Movie id
        id: u64,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a starter configuration file
    Init {
        /// TMDB API key to store (placeholder otherwise)
        #[arg(long)]
        api_key: Option<String>,

        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .map(|path| path.unwrap_or_else(|| PathManager::default().log_file()));
    logging::init_logging(cli.verbose, cli.quiet, log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Movies { list, genre } => catalog::run_list(marquee_models::MediaKind::Movie, list, genre, &output).await,
        Commands::Tv { list, genre } => catalog::run_list(marquee_models::MediaKind::Tv, list, genre, &output).await,
        Commands::Genres { tv } => catalog::run_genres(tv, &output).await,
        Commands::Movie { id } => catalog::run_movie(&id, &output).await,
        Commands::Trailer { id } => catalog::run_trailer(&id, &output).await,
        Commands::Browse { tv } => catalog::run_browse(tv, &output).await,
        Commands::ServiceConfig => catalog::run_service_config(&output).await,
        Commands::Watchlist { cmd } => watchlist::run_watchlist(cmd, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_flag_forms() {
        let cli = Cli::try_parse_from(["marquee", "genres"]).unwrap();
        assert_eq!(cli.log_file, None);

        let cli = Cli::try_parse_from(["marquee", "--log-file", "genres"]).unwrap();
        assert_eq!(cli.log_file, Some(None));

        let cli = Cli::try_parse_from(["marquee", "--log-file=/tmp/m.log", "genres"]).unwrap();
        assert_eq!(cli.log_file, Some(Some(PathBuf::from("/tmp/m.log"))));
    }
}

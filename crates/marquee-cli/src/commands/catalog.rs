use super::{load_config, tmdb_client};
use crate::output::{Output, OutputFormat};
use crate::ListArg;
use color_eyre::eyre::{eyre, Result};
use marquee_config::PathManager;
use marquee_core::convert_minutes_to_time;
use marquee_models::MediaKind;
use marquee_sources::{CatalogSource, ListCategory, TmdbClient};
use serde_json::json;
use tracing::info;

fn client() -> Result<TmdbClient> {
    let config = load_config(&PathManager::default())?;
    tmdb_client(&config)
}

fn heading(kind: MediaKind, category: ListCategory) -> String {
    let label = match category {
        ListCategory::Popular => "Popular",
        ListCategory::Trending => "Trending",
        ListCategory::TopRated => "Top rated",
    };
    format!("{} {}", label, kind)
}

pub async fn run_list(kind: MediaKind, list: ListArg, genre: Option<String>, output: &Output) -> Result<()> {
    let client = client()?;

    match genre {
        Some(genre_id) => {
            info!("Discovering {} in genre {}", kind, genre_id);
            let records = client.by_genre(kind, &genre_id).await?;
            output.records(&format!("Genre {} {}", genre_id, kind), &records);
        }
        None => {
            let category = ListCategory::from(list);
            let records = client.list(kind, category).await?;
            output.records(&heading(kind, category), &records);
        }
    }
    Ok(())
}

pub async fn run_genres(tv: bool, output: &Output) -> Result<()> {
    let kind = if tv { MediaKind::Tv } else { MediaKind::Movie };
    let genres = client()?.genres(kind).await?;
    output.genres(&genres);
    Ok(())
}

pub async fn run_movie(id: &str, output: &Output) -> Result<()> {
    let client = client()?;
    let movie = client
        .movie_by_id(id)
        .await?
        .ok_or_else(|| eyre!("No movie found with id {}", id))?;

    if output.format() != OutputFormat::Human {
        output.data(&movie);
        return Ok(());
    }

    let genres = movie.genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>().join(", ");
    let rows = [
        ("ID", movie.id.to_string()),
        ("Year", movie.release_year().map(|y| y.to_string()).unwrap_or_default()),
        ("Runtime", movie.runtime.map(convert_minutes_to_time).unwrap_or_default()),
        ("Genres", genres),
        ("Rating", movie.vote_average.map(|v| format!("{:.1}", v)).unwrap_or_default()),
        ("Image", movie.to_display_record(client.image_base_url()).image),
        ("Overview", movie.overview.clone().unwrap_or_default()),
    ];
    output.fields(&movie.title, &rows);
    Ok(())
}

pub async fn run_trailer(id: &str, output: &Output) -> Result<()> {
    let trailer = client()?.movie_trailer(id).await?;

    let Some(url) = trailer.as_ref().and_then(|video| video.youtube_url()) else {
        output.warn(format!("No YouTube trailer for movie {}", id));
        return Ok(());
    };

    match output.format() {
        OutputFormat::Human => println!("{}", url),
        OutputFormat::Json | OutputFormat::JsonPretty => output.data(&json!({
            "movie_id": id,
            "trailer": trailer,
            "url": url,
        })),
    }
    Ok(())
}

/// Popular, trending and top rated, requested concurrently
pub async fn run_browse(tv: bool, output: &Output) -> Result<()> {
    let kind = if tv { MediaKind::Tv } else { MediaKind::Movie };
    let client = client()?;

    let (popular, trending, top_rated) = futures::try_join!(
        client.list(kind, ListCategory::Popular),
        client.list(kind, ListCategory::Trending),
        client.list(kind, ListCategory::TopRated),
    )?;

    if output.format() != OutputFormat::Human {
        output.data(&json!({
            "popular": popular,
            "trending": trending,
            "top_rated": top_rated,
        }));
        return Ok(());
    }

    output.records(&heading(kind, ListCategory::Popular), &popular);
    output.records(&heading(kind, ListCategory::Trending), &trending);
    output.records(&heading(kind, ListCategory::TopRated), &top_rated);
    Ok(())
}

pub async fn run_service_config(output: &Output) -> Result<()> {
    let document = client()?.service_configuration().await?;
    match output.format() {
        // The document is nested; pretty JSON is the readable form
        OutputFormat::Human => println!("{}", serde_json::to_string_pretty(&document)?),
        OutputFormat::Json | OutputFormat::JsonPretty => output.data(&document),
    }
    Ok(())
}

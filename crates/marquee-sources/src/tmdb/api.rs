use marquee_config::TmdbConfig;
use marquee_models::{select_trailer, DisplayRecord, Genre, MediaKind, MovieDetails, Video};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use crate::error::{redact_api_key, GatewayError};
use crate::traits::HttpFetch;

/// Connection settings for the metadata service
#[derive(Debug, Clone)]
pub struct TmdbSettings {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub language: String,
}

impl From<&TmdbConfig> for TmdbSettings {
    fn from(config: &TmdbConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.clone(),
            language: config.language.clone(),
        }
    }
}

/// Curated first-page lists offered for both movies and TV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCategory {
    Popular,
    Trending,
    TopRated,
}

impl ListCategory {
    pub fn path(&self, kind: MediaKind) -> String {
        let segment = kind.path_segment();
        match self {
            ListCategory::Popular => format!("/{}/popular", segment),
            ListCategory::Trending => format!("/trending/{}/week", segment),
            ListCategory::TopRated => format!("/{}/top_rated", segment),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResultsPage<T> {
    results: Vec<T>,
}

/// A movie without a videos collection reads as having none
#[derive(Debug, Deserialize)]
struct VideosPage {
    #[serde(default)]
    results: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct GenresPage {
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct ListItem {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    backdrop_path: Option<String>,
}

impl ListItem {
    fn into_record(self, kind: MediaKind, image_base_url: &str) -> DisplayRecord {
        // Movies carry `title`, shows carry `name`
        let title = match kind {
            MediaKind::Movie => self.title.or(self.name),
            MediaKind::Tv => self.name.or(self.title),
        };
        DisplayRecord::project(self.id, title.unwrap_or_default(), image_base_url, self.backdrop_path)
    }
}

/// Build `<base><path>?api_key=<key>` followed by the extra query pairs
pub fn build_url(settings: &TmdbSettings, path: &str, params: &[(&str, &str)]) -> String {
    let mut url = format!(
        "{}{}?api_key={}",
        settings.base_url,
        path,
        urlencoding::encode(&settings.api_key)
    );
    for (name, value) in params {
        url.push('&');
        url.push_str(name);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

/// Project an upstream `{ results: [...] }` body into display records
pub fn project_results(body: &str, kind: MediaKind, image_base_url: &str) -> Result<Vec<DisplayRecord>, serde_json::Error> {
    let page: ResultsPage<ListItem> = serde_json::from_str(body)?;
    Ok(page
        .results
        .into_iter()
        .map(|item| item.into_record(kind, image_base_url))
        .collect())
}

async fn get_body(fetch: &dyn HttpFetch, url: &str) -> Result<String, GatewayError> {
    let response = fetch.get(url).await.map_err(|e| {
        warn!("TMDB request failed: {}", e);
        e
    })?;

    if !response.is_success() {
        let err = GatewayError::status(url, response.status, response.body);
        warn!("TMDB request failed: {}", err);
        return Err(err);
    }

    Ok(response.body)
}

async fn get_json<T: DeserializeOwned>(fetch: &dyn HttpFetch, url: &str) -> Result<T, GatewayError> {
    let body = get_body(fetch, url).await?;
    serde_json::from_str(&body).map_err(|e| {
        let err = GatewayError::decode(url, e);
        warn!("TMDB response could not be decoded: {}", err);
        err
    })
}

async fn get_records(
    fetch: &dyn HttpFetch,
    settings: &TmdbSettings,
    kind: MediaKind,
    path: &str,
    params: &[(&str, &str)],
) -> Result<Vec<DisplayRecord>, GatewayError> {
    let url = build_url(settings, path, params);
    let body = get_body(fetch, &url).await?;
    let records = project_results(&body, kind, &settings.image_base_url).map_err(|e| {
        let err = GatewayError::decode(&url, e);
        warn!("TMDB response could not be decoded: {}", err);
        err
    })?;

    debug!("Fetched {} {} from {}", records.len(), kind, redact_api_key(&url));
    Ok(records)
}

/// Service configuration, returned verbatim
pub async fn get_configuration(fetch: &dyn HttpFetch, settings: &TmdbSettings) -> Result<serde_json::Value, GatewayError> {
    get_json(fetch, &build_url(settings, "/configuration", &[])).await
}

/// First page of a curated list (popular, trending this week, top rated)
pub async fn get_list(
    fetch: &dyn HttpFetch,
    settings: &TmdbSettings,
    kind: MediaKind,
    category: ListCategory,
) -> Result<Vec<DisplayRecord>, GatewayError> {
    get_records(fetch, settings, kind, &category.path(kind), &[]).await
}

/// Genre lookup table, passed through unmodified
pub async fn get_genres(fetch: &dyn HttpFetch, settings: &TmdbSettings, kind: MediaKind) -> Result<Vec<Genre>, GatewayError> {
    let path = format!("/genre/{}/list", kind.path_segment());
    let page: GenresPage = get_json(fetch, &build_url(settings, &path, &[])).await?;
    Ok(page.genres)
}

/// First page of discovery results filtered by one genre id
pub async fn discover_by_genre(
    fetch: &dyn HttpFetch,
    settings: &TmdbSettings,
    kind: MediaKind,
    genre_id: &str,
) -> Result<Vec<DisplayRecord>, GatewayError> {
    let path = format!("/discover/{}", kind.path_segment());
    get_records(fetch, settings, kind, &path, &[("with_genres", genre_id), ("page", "1")]).await
}

/// Single movie; a 404 from the service maps to `None`
pub async fn get_movie_by_id(
    fetch: &dyn HttpFetch,
    settings: &TmdbSettings,
    movie_id: &str,
) -> Result<Option<MovieDetails>, GatewayError> {
    let path = format!("/movie/{}", urlencoding::encode(movie_id));
    let url = build_url(settings, &path, &[("language", settings.language.as_str())]);

    match get_json(fetch, &url).await {
        Ok(details) => Ok(Some(details)),
        Err(e) if e.http_status() == Some(404) => {
            debug!("Movie {} not found", movie_id);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// All videos attached to a movie; an unknown movie has none
pub async fn get_movie_videos(fetch: &dyn HttpFetch, settings: &TmdbSettings, movie_id: &str) -> Result<Vec<Video>, GatewayError> {
    let path = format!("/movie/{}/videos", urlencoding::encode(movie_id));
    let url = build_url(settings, &path, &[("language", settings.language.as_str())]);

    match get_json::<VideosPage>(fetch, &url).await {
        Ok(page) => Ok(page.results),
        Err(e) if e.http_status() == Some(404) => {
            debug!("No videos for movie {}", movie_id);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// First YouTube trailer of a movie
pub async fn get_movie_trailer(fetch: &dyn HttpFetch, settings: &TmdbSettings, movie_id: &str) -> Result<Option<Video>, GatewayError> {
    let videos = get_movie_videos(fetch, settings, movie_id).await?;
    let trailer = select_trailer(&videos).cloned();
    if trailer.is_none() {
        debug!("No YouTube trailer among {} videos for movie {}", videos.len(), movie_id);
    }
    Ok(trailer)
}

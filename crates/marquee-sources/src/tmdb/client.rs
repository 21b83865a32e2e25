use crate::error::GatewayError;
use crate::http::ReqwestFetch;
use crate::tmdb::api::{self, ListCategory, TmdbSettings};
use crate::traits::{CatalogSource, HttpFetch};
use anyhow::Result;
use async_trait::async_trait;
use marquee_config::TmdbConfig;
use marquee_models::{DisplayRecord, Genre, MediaKind, MovieDetails, Video};
use std::sync::Arc;

#[derive(Clone)]
pub struct TmdbClient {
    fetch: Arc<dyn HttpFetch>,
    settings: TmdbSettings,
}

impl TmdbClient {
    pub fn new(fetch: Arc<dyn HttpFetch>, settings: TmdbSettings) -> Self {
        Self { fetch, settings }
    }

    /// Client over reqwest, configured from the `[tmdb]` section
    pub fn from_config(config: &TmdbConfig) -> Result<Self> {
        let fetch = ReqwestFetch::new()?;
        Ok(Self::new(Arc::new(fetch), TmdbSettings::from(config)))
    }

    pub async fn popular_movies(&self) -> Result<Vec<DisplayRecord>, GatewayError> {
        self.list(MediaKind::Movie, ListCategory::Popular).await
    }

    pub async fn trending_movies(&self) -> Result<Vec<DisplayRecord>, GatewayError> {
        self.list(MediaKind::Movie, ListCategory::Trending).await
    }

    pub async fn top_rated_movies(&self) -> Result<Vec<DisplayRecord>, GatewayError> {
        self.list(MediaKind::Movie, ListCategory::TopRated).await
    }

    pub async fn movies_by_genre(&self, genre_id: &str) -> Result<Vec<DisplayRecord>, GatewayError> {
        self.by_genre(MediaKind::Movie, genre_id).await
    }

    pub async fn popular_tv(&self) -> Result<Vec<DisplayRecord>, GatewayError> {
        self.list(MediaKind::Tv, ListCategory::Popular).await
    }

    pub async fn trending_tv(&self) -> Result<Vec<DisplayRecord>, GatewayError> {
        self.list(MediaKind::Tv, ListCategory::Trending).await
    }

    pub async fn top_rated_tv(&self) -> Result<Vec<DisplayRecord>, GatewayError> {
        self.list(MediaKind::Tv, ListCategory::TopRated).await
    }

    pub async fn tv_by_genre(&self, genre_id: &str) -> Result<Vec<DisplayRecord>, GatewayError> {
        self.by_genre(MediaKind::Tv, genre_id).await
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    fn image_base_url(&self) -> &str {
        &self.settings.image_base_url
    }

    async fn service_configuration(&self) -> Result<serde_json::Value, GatewayError> {
        api::get_configuration(self.fetch.as_ref(), &self.settings).await
    }

    async fn list(&self, kind: MediaKind, category: ListCategory) -> Result<Vec<DisplayRecord>, GatewayError> {
        api::get_list(self.fetch.as_ref(), &self.settings, kind, category).await
    }

    async fn genres(&self, kind: MediaKind) -> Result<Vec<Genre>, GatewayError> {
        api::get_genres(self.fetch.as_ref(), &self.settings, kind).await
    }

    async fn by_genre(&self, kind: MediaKind, genre_id: &str) -> Result<Vec<DisplayRecord>, GatewayError> {
        api::discover_by_genre(self.fetch.as_ref(), &self.settings, kind, genre_id).await
    }

    async fn movie_by_id(&self, movie_id: &str) -> Result<Option<MovieDetails>, GatewayError> {
        api::get_movie_by_id(self.fetch.as_ref(), &self.settings, movie_id).await
    }

    async fn movie_trailer(&self, movie_id: &str) -> Result<Option<Video>, GatewayError> {
        api::get_movie_trailer(self.fetch.as_ref(), &self.settings, movie_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use std::sync::Mutex;

    /// Answers by path and remembers what was asked
    #[derive(Default)]
    struct RoutedFetch {
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl HttpFetch for RoutedFetch {
        async fn get(&self, url: &str) -> Result<HttpResponse, GatewayError> {
            self.requested.lock().unwrap().push(url.to_string());
            let body = if url.contains("/tv/") || url.contains("/discover/tv?") {
                r#"{"results": [{"id": 1, "name": "Show", "backdrop_path": "/s.jpg"}]}"#
            } else {
                r#"{"results": [{"id": 2, "title": "Film", "backdrop_path": "/f.jpg"}]}"#
            };
            Ok(HttpResponse::ok(body))
        }
    }

    fn client(fetch: Arc<RoutedFetch>) -> TmdbClient {
        let mut config = TmdbConfig::default();
        config.api_key = "k".to_string();
        TmdbClient::new(fetch, TmdbSettings::from(&config))
    }

    #[tokio::test]
    async fn test_named_queries_hit_their_paths() {
        let fetch = Arc::new(RoutedFetch::default());
        let client = client(fetch.clone());

        assert_eq!(client.popular_movies().await.unwrap()[0].title, "Film");
        client.trending_movies().await.unwrap();
        client.top_rated_movies().await.unwrap();
        client.movies_by_genre("28").await.unwrap();
        assert_eq!(client.popular_tv().await.unwrap()[0].title, "Show");
        client.trending_tv().await.unwrap();
        client.top_rated_tv().await.unwrap();

        let requested = fetch.requested.lock().unwrap().clone();
        let paths: Vec<&str> = requested
            .iter()
            .map(|url| url.trim_start_matches("https://api.themoviedb.org/3").split('?').next().unwrap())
            .collect();
        assert_eq!(
            paths,
            vec![
                "/movie/popular",
                "/trending/movie/week",
                "/movie/top_rated",
                "/discover/movie",
                "/tv/popular",
                "/trending/tv/week",
                "/tv/top_rated",
            ]
        );
    }

    #[tokio::test]
    async fn test_tv_by_genre_projects_names() {
        let fetch = Arc::new(RoutedFetch::default());
        let client = client(fetch.clone());

        let records = client.tv_by_genre("18").await.unwrap();
        assert_eq!(records[0].title, "Show");
        assert_eq!(records[0].image, "https://image.tmdb.org/t/p/w500/s.jpg");
        assert!(fetch.requested.lock().unwrap()[0].contains("/discover/tv?api_key=k&with_genres=18&page=1"));
    }

    #[test]
    fn test_image_base_url_from_settings() {
        let client = client(Arc::new(RoutedFetch::default()));
        assert_eq!(client.image_base_url(), "https://image.tmdb.org/t/p/w500");
        assert_eq!(client.source_name(), "tmdb");
    }
}

use async_trait::async_trait;
use marquee_models::{DisplayRecord, Genre, MediaKind, MovieDetails, Video};
use crate::error::GatewayError;
use crate::http::HttpResponse;
use crate::tmdb::ListCategory;

/// Transport used by every gateway query.
///
/// Production code binds it to reqwest; tests swap in a double that replays
/// canned bodies.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, GatewayError>;
}

/// Named catalog queries against the upstream metadata service
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Prefix used to build `DisplayRecord::image`
    fn image_base_url(&self) -> &str;

    async fn service_configuration(&self) -> Result<serde_json::Value, GatewayError>;

    async fn list(&self, kind: MediaKind, category: ListCategory) -> Result<Vec<DisplayRecord>, GatewayError>;

    async fn genres(&self, kind: MediaKind) -> Result<Vec<Genre>, GatewayError>;

    async fn by_genre(&self, kind: MediaKind, genre_id: &str) -> Result<Vec<DisplayRecord>, GatewayError>;

    /// `None` when the service has no movie with this id
    async fn movie_by_id(&self, movie_id: &str) -> Result<Option<MovieDetails>, GatewayError>;

    /// First YouTube trailer, `None` when the movie has none
    async fn movie_trailer(&self, movie_id: &str) -> Result<Option<Video>, GatewayError>;
}

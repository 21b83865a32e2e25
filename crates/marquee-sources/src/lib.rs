pub mod error;
pub mod http;
pub mod traits;
pub mod tmdb;

pub use error::{redact_api_key, GatewayError};
pub use http::{HttpResponse, ReqwestFetch};
pub use traits::{CatalogSource, HttpFetch};
pub use tmdb::{ListCategory, TmdbClient, TmdbSettings};

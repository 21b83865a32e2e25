pub mod api;
pub mod client;

pub use api::{ListCategory, TmdbSettings};
pub use client::TmdbClient;

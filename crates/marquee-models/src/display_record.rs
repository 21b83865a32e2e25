use serde::{Deserialize, Serialize};

/// UI-ready projection of a movie or TV show.
///
/// `title` holds the movie title or the show name. Records persisted by older
/// front ends may carry `name` instead of, or next to, `title`; both read back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "StoredRecord")]
pub struct DisplayRecord {
    pub id: u64,
    pub title: String,
    pub image: String,
    pub poster_path: Option<String>,
}

/// On-disk shape, tolerant of `name` next to or instead of `title`
#[derive(Deserialize)]
struct StoredRecord {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    image: String,
    #[serde(default)]
    poster_path: Option<String>,
}

impl From<StoredRecord> for DisplayRecord {
    fn from(stored: StoredRecord) -> Self {
        Self {
            id: stored.id,
            title: stored.title.or(stored.name).unwrap_or_default(),
            image: stored.image,
            poster_path: stored.poster_path,
        }
    }
}

impl DisplayRecord {
    /// Build a record from upstream fields, joining the image prefix with the
    /// backdrop path. A missing backdrop leaves just the prefix.
    pub fn project(id: u64, title: String, image_base_url: &str, backdrop_path: Option<String>) -> Self {
        let image = format!("{}{}", image_base_url, backdrop_path.as_deref().unwrap_or_default());
        Self {
            id,
            title,
            image,
            poster_path: backdrop_path,
        }
    }
}

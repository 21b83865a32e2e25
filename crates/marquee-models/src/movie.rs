use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::display_record::DisplayRecord;
use crate::genre::Genre;

/// Single-movie resource as returned upstream.
///
/// The commonly displayed fields are typed; everything else the service sends
/// is kept in `extra` so the object can be passed on unmodified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MovieDetails {
    /// Project into the record shape stored on the watchlist
    pub fn to_display_record(&self, image_base_url: &str) -> DisplayRecord {
        DisplayRecord::project(self.id, self.title.clone(), image_base_url, self.backdrop_path.clone())
    }

    /// Release year parsed from `release_date` (`YYYY-MM-DD`)
    pub fn release_year(&self) -> Option<u32> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_details_keeps_unknown_fields() {
        let json = r#"{
            "id": 550,
            "title": "Fight Club",
            "runtime": 139,
            "release_date": "1999-10-15",
            "genres": [{"id": 18, "name": "Drama"}],
            "backdrop_path": "/hZkgoQYus5vegHoetLkCJzb17zJ.jpg",
            "tagline": "Mischief. Mayhem. Soap.",
            "budget": 63000000
        }"#;

        let details: MovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.id, 550);
        assert_eq!(details.runtime, Some(139));
        assert_eq!(details.genres[0].name, "Drama");
        assert_eq!(details.release_year(), Some(1999));
        assert_eq!(details.extra.get("tagline").and_then(|v| v.as_str()), Some("Mischief. Mayhem. Soap."));

        let back = serde_json::to_value(&details).unwrap();
        assert_eq!(back["budget"], 63000000);
    }

    #[test]
    fn test_to_display_record() {
        let details: MovieDetails = serde_json::from_str(
            r#"{"id": 603, "title": "The Matrix", "backdrop_path": "/bg.jpg"}"#,
        )
        .unwrap();

        let record = details.to_display_record("https://image.tmdb.org/t/p/w500");
        assert_eq!(record.id, 603);
        assert_eq!(record.title, "The Matrix");
        assert_eq!(record.image, "https://image.tmdb.org/t/p/w500/bg.jpg");
        assert_eq!(record.poster_path.as_deref(), Some("/bg.jpg"));
    }

    #[test]
    fn test_release_year_missing_or_malformed() {
        let mut details: MovieDetails = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(details.release_year(), None);
        details.release_date = Some("".to_string());
        assert_eq!(details.release_year(), None);
    }
}

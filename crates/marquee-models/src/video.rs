use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a movie's video collection (trailers, teasers, clips).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && self.video_type == "Trailer"
    }

    /// Watch URL for YouTube-hosted videos
    pub fn youtube_url(&self) -> Option<String> {
        if self.site != "YouTube" {
            return None;
        }
        self.key
            .as_deref()
            .map(|key| format!("https://www.youtube.com/watch?v={}", key))
    }
}

/// First YouTube trailer in upstream order, if any
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
    videos.iter().find(|video| video.is_youtube_trailer())
}

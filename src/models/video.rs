//! Playlist video data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base URL for YouTube watch links.
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// A video listed in a YouTube playlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistVideo {
    /// YouTube video identifier
    pub video_id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub published_at: DateTime<Utc>,

    /// Best available thumbnail (empty when the API gave none)
    #[serde(default)]
    pub thumbnail_url: String,
}

impl PlaylistVideo {
    /// Watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("{}{}", WATCH_URL, self.video_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        let video = PlaylistVideo {
            video_id: "dQw4w9WgXcQ".to_string(),
            title: "Codeforces Round 930 Solutions".to_string(),
            description: String::new(),
            published_at: Utc::now(),
            thumbnail_url: String::new(),
        };
        assert_eq!(
            video.watch_url(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }
}

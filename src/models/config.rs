//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Platform;
use crate::error::{AppError, Result};
use crate::services::youtube::extract_playlist_id;

/// Largest page the YouTube Data API returns for `playlistItems`.
pub const MAX_PLAYLIST_RESULTS: u32 = 50;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// YouTube Data API settings
    #[serde(default)]
    pub youtube: YouTubeConfig,

    /// Solution playlist per platform
    #[serde(default)]
    pub playlists: PlaylistConfig,

    /// Contest list endpoints per platform
    #[serde(default)]
    pub sources: SourceConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.youtube.max_results == 0 || self.youtube.max_results > MAX_PLAYLIST_RESULTS {
            return Err(AppError::validation(format!(
                "youtube.max_results must be between 1 and {MAX_PLAYLIST_RESULTS}"
            )));
        }
        for platform in Platform::ALL {
            if let Some(url) = self.playlists.url_for(platform) {
                if extract_playlist_id(url).is_none() {
                    return Err(AppError::validation(format!(
                        "playlists.{platform} has no playlist id: {url}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// HTTP client settings shared by every remote source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// YouTube Data API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YouTubeConfig {
    /// API key; smart matching refuses to run without one
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the Data API
    #[serde(default = "defaults::api_base_url")]
    pub api_base_url: String,

    /// Videos requested per playlist
    #[serde(default = "defaults::max_results")]
    pub max_results: u32,
}

impl YouTubeConfig {
    /// The configured API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: defaults::api_base_url(),
            max_results: defaults::max_results(),
        }
    }
}

/// Solution playlist URL per platform. An empty URL disables the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistConfig {
    #[serde(default = "defaults::codeforces_playlist")]
    pub codeforces: String,
    #[serde(default = "defaults::codechef_playlist")]
    pub codechef: String,
    #[serde(default = "defaults::leetcode_playlist")]
    pub leetcode: String,
}

impl PlaylistConfig {
    pub fn url_for(&self, platform: Platform) -> Option<&str> {
        let url = match platform {
            Platform::Codeforces => &self.codeforces,
            Platform::Codechef => &self.codechef,
            Platform::Leetcode => &self.leetcode,
        };
        Some(url.trim()).filter(|u| !u.is_empty())
    }
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            codeforces: defaults::codeforces_playlist(),
            codechef: defaults::codechef_playlist(),
            leetcode: defaults::leetcode_playlist(),
        }
    }
}

/// Contest API endpoint per platform. An empty URL disables fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "defaults::codeforces_source")]
    pub codeforces: String,
    #[serde(default = "defaults::codechef_source")]
    pub codechef: String,
    #[serde(default = "defaults::leetcode_source")]
    pub leetcode: String,
}

impl SourceConfig {
    pub fn url_for(&self, platform: Platform) -> &str {
        match platform {
            Platform::Codeforces => &self.codeforces,
            Platform::Codechef => &self.codechef,
            Platform::Leetcode => &self.leetcode,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            codeforces: defaults::codeforces_source(),
            codechef: defaults::codechef_source(),
            leetcode: defaults::leetcode_source(),
        }
    }
}

mod defaults {
    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; contest-linker/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // YouTube defaults
    pub fn api_base_url() -> String {
        "https://www.googleapis.com/youtube/v3".into()
    }
    pub fn max_results() -> u32 {
        super::MAX_PLAYLIST_RESULTS
    }

    // Playlist defaults
    pub fn codeforces_playlist() -> String {
        "https://www.youtube.com/playlist?list=PLcXpkI9A-RZLUfBSNp-YQBCOezZKbDSgB".into()
    }
    pub fn codechef_playlist() -> String {
        "https://www.youtube.com/playlist?list=PLcXpkI9A-RZIZ6lsE0KCcLWeKNoG45fYr".into()
    }
    pub fn leetcode_playlist() -> String {
        "https://www.youtube.com/playlist?list=PLcXpkI9A-RZI6FhydNz3JBt_-p_i25Cbr".into()
    }

    // Source defaults
    pub fn codeforces_source() -> String {
        "https://codeforces.com/api/contest.list".into()
    }
    pub fn codechef_source() -> String {
        concat!(
            "https://www.codechef.com/api/list/contests/all",
            "?sort_by=START&sorting_order=asc&offset=0&mode=all"
        )
        .into()
    }
    pub fn leetcode_source() -> String {
        "https://leetcode.com/graphql".into()
    }
}

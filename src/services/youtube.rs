// src/services/youtube.rs

//! YouTube Data API playlist client.
//!
//! Only the `playlistItems` endpoint is used. One request returns at most
//! [`MAX_PLAYLIST_RESULTS`](crate::models::MAX_PLAYLIST_RESULTS) videos;
//! later pages are not requested.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{HttpConfig, PlaylistVideo, YouTubeConfig};
use crate::utils::http::create_async_client;

/// Source of playlist videos.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Fetch the videos of a playlist.
    async fn playlist_videos(
        &self,
        playlist_url: &str,
        api_key: &str,
    ) -> Result<Vec<PlaylistVideo>>;
}

/// Extract the playlist ID from a YouTube playlist or watch URL.
///
/// Accepts `youtube.com/playlist?list=ID`, `youtube.com/watch?v=X&list=ID`
/// and `youtu.be/X?list=ID`.
pub fn extract_playlist_id(playlist_url: &str) -> Option<String> {
    let url = Url::parse(playlist_url.trim()).ok()?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

    let path_ok = match host {
        "youtube.com" => matches!(url.path(), "/playlist" | "/watch"),
        "youtu.be" => url.path().len() > 1,
        _ => false,
    };
    if !path_ok {
        return None;
    }

    url.query_pairs()
        .find(|(key, _)| key == "list")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

/// Playlist client backed by the YouTube Data API v3.
pub struct YouTubeClient {
    client: Client,
    api_base_url: String,
    max_results: u32,
}

impl YouTubeClient {
    /// Create a client from HTTP and YouTube settings.
    pub fn new(http: &HttpConfig, youtube: &YouTubeConfig) -> Result<Self> {
        Ok(Self::with_client(create_async_client(http)?, youtube))
    }

    /// Create a client reusing an existing HTTP client.
    pub fn with_client(client: Client, youtube: &YouTubeConfig) -> Self {
        Self {
            client,
            api_base_url: youtube.api_base_url.trim_end_matches('/').to_string(),
            max_results: youtube.max_results,
        }
    }

    fn items_url(&self, playlist_id: &str, api_key: &str) -> Result<Url> {
        let endpoint = format!("{}/playlistItems", self.api_base_url);
        let max_results = self.max_results.to_string();
        Ok(Url::parse_with_params(
            &endpoint,
            &[
                ("part", "snippet"),
                ("maxResults", max_results.as_str()),
                ("playlistId", playlist_id),
                ("key", api_key),
            ],
        )?)
    }
}

#[async_trait]
impl VideoSource for YouTubeClient {
    async fn playlist_videos(
        &self,
        playlist_url: &str,
        api_key: &str,
    ) -> Result<Vec<PlaylistVideo>> {
        if playlist_url.trim().is_empty() {
            return Err(AppError::config("No playlist URL provided"));
        }
        if api_key.trim().is_empty() {
            return Err(AppError::config("YouTube API key is required"));
        }
        let playlist_id = extract_playlist_id(playlist_url)
            .ok_or_else(|| AppError::validation("Invalid playlist URL"))?;

        log::debug!("Requesting playlist {}", playlist_id);
        let response = self
            .client
            .get(self.items_url(&playlist_id, api_key)?)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        let videos = parse_playlist_items(&body)?;
        log::debug!("Playlist {} returned {} videos", playlist_id, videos.len());
        Ok(videos)
    }
}

#[derive(Debug, Deserialize)]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    published_at: Option<DateTime<Utc>>,
    resource_id: Option<ResourceId>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Parse a `playlistItems` response body.
///
/// Items without a video ID or publish date (deleted or private videos) are
/// dropped.
pub(crate) fn parse_playlist_items(body: &str) -> Result<Vec<PlaylistVideo>> {
    let response: PlaylistItemsResponse = serde_json::from_str(body)?;

    let videos = response
        .items
        .into_iter()
        .filter_map(|item| {
            let snippet = item.snippet?;
            let video_id = snippet.resource_id?.video_id?;
            let Some(published_at) = snippet.published_at else {
                log::debug!("Skipping playlist item {} without publish date", video_id);
                return None;
            };
            let thumbnails = snippet.thumbnails;
            let thumbnail_url = thumbnails
                .high
                .or(thumbnails.medium)
                .or(thumbnails.default)
                .map(|t| t.url)
                .unwrap_or_default();

            Some(PlaylistVideo {
                video_id,
                title: snippet.title,
                description: snippet.description.unwrap_or_default(),
                published_at,
                thumbnail_url,
            })
        })
        .collect();

    Ok(videos)
}

/// Build an error from a non-success API response.
fn api_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .and_then(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("API request failed with status {status}"));
    AppError::api(status, message)
}

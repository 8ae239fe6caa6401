// src/pipeline/lookup.rs

//! Single-contest video lookup.

use crate::models::{Config, Platform};
use crate::services::{VideoSource, extract_round_number, fallback_link, match_video};

/// Find a solution link for one contest.
///
/// Returns `None` without an API key or without a playlist for the platform.
/// An empty name yields the playlist URL. A failed playlist fetch is logged
/// and also yields the playlist URL.
pub async fn find_video_for_contest(
    config: &Config,
    videos: &dyn VideoSource,
    contest_name: &str,
    platform: Platform,
) -> Option<String> {
    let api_key = config.youtube.api_key()?;
    let playlist_url = config.playlists.url_for(platform)?;

    let name = contest_name.trim();
    if name.is_empty() {
        return Some(playlist_url.to_string());
    }

    let playlist = match videos.playlist_videos(playlist_url, api_key).await {
        Ok(playlist) => playlist,
        Err(e) => {
            log::warn!(
                "Failed to fetch {} playlist for \"{}\": {}",
                platform.display_name(),
                name,
                e
            );
            return Some(playlist_url.to_string());
        }
    };

    let round_id = extract_round_number(name);
    let link = match match_video(name, platform, round_id.as_deref(), &playlist) {
        Some(hit) => {
            log::info!(
                "Found {} match for \"{}\": {}",
                hit.match_type.as_str(),
                name,
                hit.video.title
            );
            hit.video.watch_url()
        }
        None => fallback_link(name, platform, &playlist, playlist_url),
    };
    Some(link)
}

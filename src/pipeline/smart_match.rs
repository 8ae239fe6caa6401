// src/pipeline/smart_match.rs

//! Smart matching of past contests to playlist videos.
//!
//! For each platform, in the order of [`Platform::ALL`]:
//!
//! 1. Past contests with a manual link are skipped
//! 2. The platform playlist is fetched once, and only if something is left
//! 3. Every remaining contest gets a matched video or a fallback link
//!
//! Matched links are merged under the manual links and the result replaces
//! the persisted link blob.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{
    Config, Contest, MatchStatistics, MatchedVideo, Platform, PlatformStats, SolutionLinkMap,
    contest_order,
};
use crate::services::{VideoSource, extract_round_number, fallback_link, match_video};
use crate::storage::SolutionLinkStore;

/// Error recorded when smart matching is attempted without an API key.
pub const MISSING_API_KEY: &str = "YouTube API key is missing";

/// Links and statistics produced by one matching pass.
#[derive(Debug, Clone, Default)]
pub struct SmartMatchOutcome {
    /// Automatic links, including fallback links for unmatched contests
    pub result_map: SolutionLinkMap,
    pub stats: MatchStatistics,
}

/// Summary returned after a persisted smart-match run.
#[derive(Debug, Clone)]
pub struct SmartMatchReport {
    pub stats: MatchStatistics,
    pub total_matched: usize,
    pub total_contests: usize,
    pub total_skipped: usize,
    /// Links in the store after the run; 0 when nothing was written
    pub links_saved: usize,
}

impl SmartMatchReport {
    fn new(stats: MatchStatistics, links_saved: usize) -> Self {
        Self {
            total_matched: stats.matched,
            total_contests: stats.total,
            total_skipped: stats.skipped,
            stats,
            links_saved,
        }
    }
}

/// Matches contests against each platform's solution playlist.
pub struct SmartMatcher<'a> {
    config: &'a Config,
    videos: &'a dyn VideoSource,
}

impl<'a> SmartMatcher<'a> {
    pub fn new(config: &'a Config, videos: &'a dyn VideoSource) -> Self {
        Self { config, videos }
    }

    /// Run one matching pass without touching storage.
    ///
    /// `manual_links` is the snapshot of saved links; contests found in it
    /// are skipped. Without an API key nothing is fetched and the returned
    /// statistics carry an error.
    pub async fn run(&self, contests: &[Contest], manual_links: &SolutionLinkMap) -> SmartMatchOutcome {
        let Some(api_key) = self.config.youtube.api_key() else {
            log::error!("{}, cannot perform smart matching", MISSING_API_KEY);
            return SmartMatchOutcome {
                result_map: SolutionLinkMap::new(),
                stats: MatchStatistics::failed(MISSING_API_KEY),
            };
        };

        log::info!("Starting smart matching for {} contests", contests.len());

        let mut outcome = SmartMatchOutcome::default();
        let buckets = bucket_by_platform(contests);

        for (platform, bucket) in buckets {
            let platform_stats = self
                .match_platform(platform, &bucket, manual_links, api_key, &mut outcome.result_map)
                .await;

            outcome.stats.total += platform_stats.total;
            outcome.stats.matched += platform_stats.matched;
            outcome.stats.skipped += platform_stats.skipped;
            outcome.stats.platforms.insert(platform, platform_stats);
        }

        outcome.stats.finalize();
        log::info!(
            "Smart matching completed with {} links ({:.1}% matched)",
            outcome.result_map.len(),
            outcome.stats.match_rate
        );
        outcome
    }

    async fn match_platform(
        &self,
        platform: Platform,
        bucket: &[&Contest],
        manual_links: &SolutionLinkMap,
        api_key: &str,
        result_map: &mut SolutionLinkMap,
    ) -> PlatformStats {
        let mut stats = PlatformStats::new(bucket.len());

        let Some(playlist_url) = self.config.playlists.url_for(platform) else {
            log::info!("Skipping {}: no playlist configured", platform.display_name());
            return stats;
        };
        if bucket.is_empty() {
            log::debug!("Skipping {}: no past contests", platform.display_name());
            return stats;
        }

        log::info!(
            "Processing {} contests with playlist {}",
            platform.display_name(),
            playlist_url
        );

        let pending: Vec<&Contest> = bucket
            .iter()
            .copied()
            .filter(|contest| !manual_links.contains_key(&contest.id))
            .collect();
        stats.skipped = bucket.len() - pending.len();

        if pending.is_empty() {
            log::info!(
                "Skipping {}: all contests already have manual links",
                platform.display_name()
            );
            return stats;
        }

        let videos = match self.videos.playlist_videos(playlist_url, api_key).await {
            Ok(videos) => videos,
            Err(e) => {
                log::warn!("Error processing {} contests: {}", platform.display_name(), e);
                stats.error = Some(format!("Error: {e}"));
                return stats;
            }
        };
        log::info!(
            "Fetched {} videos from {} playlist",
            videos.len(),
            platform.display_name()
        );

        for contest in &pending {
            let round_id = extract_round_number(&contest.name);
            match match_video(&contest.name, platform, round_id.as_deref(), &videos) {
                Some(hit) => {
                    log::debug!(
                        "{} match: \"{}\" -> \"{}\"",
                        hit.match_type.as_str(),
                        contest.name,
                        hit.video.title
                    );
                    result_map.insert(contest.id.clone(), hit.video.watch_url());
                    stats.matched += 1;
                    stats.matched_videos.push(MatchedVideo {
                        contest_name: contest.name.clone(),
                        video_title: hit.video.title.clone(),
                        match_type: hit.match_type,
                    });
                }
                None => {
                    log::debug!("No match for \"{}\", using fallback link", contest.name);
                    let link = fallback_link(&contest.name, platform, &videos, playlist_url);
                    result_map.insert(contest.id.clone(), link);
                }
            }
        }

        log::info!(
            "Matched {} out of {} {} contests",
            stats.matched,
            pending.len(),
            platform.display_name()
        );
        stats
    }
}

/// Group past contests by platform, each group ordered most recent first.
///
/// Every platform has an entry, possibly empty.
pub fn bucket_by_platform(contests: &[Contest]) -> BTreeMap<Platform, Vec<&Contest>> {
    let mut buckets: BTreeMap<Platform, Vec<&Contest>> =
        Platform::ALL.iter().map(|&p| (p, Vec::new())).collect();

    for contest in contests {
        if let Some(bucket) = buckets.get_mut(&contest.platform) {
            bucket.push(contest);
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by(|a, b| contest_order(a, b));
        bucket.retain(|contest| contest.is_past());
    }
    buckets
}

/// Overlay manual links on automatic ones; manual links win.
pub fn merge_links(mut result_map: SolutionLinkMap, manual_links: &SolutionLinkMap) -> SolutionLinkMap {
    result_map.extend(manual_links.iter().map(|(k, v)| (k.clone(), v.clone())));
    result_map
}

/// Run smart matching and persist the merged links.
///
/// Saved links are read once up front and written once at the end as a full
/// overwrite. A missing API key returns error statistics and writes nothing.
pub async fn run_smart_match(
    config: &Config,
    videos: &dyn VideoSource,
    store: &SolutionLinkStore<'_>,
    contests: &[Contest],
) -> Result<SmartMatchReport> {
    let manual_links = store.get().await?;
    let outcome = SmartMatcher::new(config, videos)
        .run(contests, &manual_links)
        .await;

    if outcome.stats.error.is_some() {
        return Ok(SmartMatchReport::new(outcome.stats, 0));
    }

    let final_links = merge_links(outcome.result_map, &manual_links);
    store.replace_all(&final_links).await?;
    log::info!("Saved {} solution links", final_links.len());

    Ok(SmartMatchReport::new(outcome.stats, final_links.len()))
}

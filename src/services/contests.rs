// src/services/contests.rs

//! Contest list sources.
//!
//! Contests come straight from each platform's public API and are normalized
//! into [`Contest`] values by the parsers in [`super::platforms`].

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use reqwest::Client;

use super::platforms::{codechef, codeforces, leetcode};
use crate::error::Result;
use crate::models::{Contest, HttpConfig, Platform, PlaylistConfig, SolutionLinkMap, SourceConfig};
use crate::utils::http::{create_async_client, fetch_text, post_json};

/// Source of contest lists per platform.
#[async_trait]
pub trait ContestSource: Send + Sync {
    async fn fetch_contests(&self, platform: Platform) -> Result<Vec<Contest>>;
}

/// Contest source backed by the platforms' own APIs.
pub struct PlatformApiSource {
    client: Client,
    sources: SourceConfig,
}

impl PlatformApiSource {
    pub fn new(http: &HttpConfig, sources: &SourceConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(http)?,
            sources: sources.clone(),
        })
    }
}

#[async_trait]
impl ContestSource for PlatformApiSource {
    async fn fetch_contests(&self, platform: Platform) -> Result<Vec<Contest>> {
        let url = self.sources.url_for(platform).trim();
        if url.is_empty() {
            log::debug!("No contest source configured for {}", platform);
            return Ok(Vec::new());
        }

        log::debug!("Fetching {} contests from {}", platform.display_name(), url);
        let now = Utc::now();
        match platform {
            Platform::Codeforces => {
                codeforces::parse_contests(&fetch_text(&self.client, url).await?, now)
            }
            Platform::Codechef => {
                codechef::parse_contests(&fetch_text(&self.client, url).await?, now)
            }
            Platform::Leetcode => {
                let body = post_json(&self.client, url, &leetcode::request_body()).await?;
                leetcode::parse_contests(&body, now)
            }
        }
    }
}

/// Fetch every platform's contests concurrently.
///
/// A failing platform is logged and contributes no contests. Contests tagged
/// with a different platform than the one requested are dropped.
pub async fn fetch_all_contests(source: &dyn ContestSource) -> Vec<Contest> {
    let requests = Platform::ALL.map(|platform| async move {
        (platform, source.fetch_contests(platform).await)
    });

    let mut all = Vec::new();
    for (platform, result) in join_all(requests).await {
        match result {
            Ok(contests) => {
                let before = contests.len();
                all.extend(contests.into_iter().filter(|c| c.platform == platform));
                log::info!("Fetched {} {} contests", before, platform.display_name());
            }
            Err(e) => {
                log::warn!("Failed to fetch {} contests: {}", platform.display_name(), e);
            }
        }
    }
    all
}

/// Attach a solution link to every contest.
///
/// Saved links win; otherwise the platform's playlist URL is used when one is
/// configured.
pub fn apply_solution_links(
    contests: &mut [Contest],
    links: &SolutionLinkMap,
    playlists: &PlaylistConfig,
) {
    for contest in contests.iter_mut() {
        contest.solution_link = links
            .get(&contest.id)
            .cloned()
            .or_else(|| playlists.url_for(contest.platform).map(str::to_string));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::ContestStatus;
    use chrono::{TimeZone, Utc};

    fn contest(id: &str, platform: Platform) -> Contest {
        let start = Utc.with_ymd_and_hms(2025, 1, 4, 14, 30, 0).unwrap();
        Contest {
            id: id.to_string(),
            name: id.to_string(),
            platform,
            url: String::new(),
            start_time: start,
            end_time: start,
            status: ContestStatus::Past,
            solution_link: None,
        }
    }

    struct FakeSource;

    #[async_trait]
    impl ContestSource for FakeSource {
        async fn fetch_contests(&self, platform: Platform) -> Result<Vec<Contest>> {
            match platform {
                Platform::Codeforces => Ok(vec![
                    contest("codeforces-1", Platform::Codeforces),
                    contest("stray", Platform::Leetcode),
                ]),
                Platform::Codechef => Err(AppError::fetch("codechef", "status 503")),
                Platform::Leetcode => Ok(vec![contest("leetcode-1", Platform::Leetcode)]),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_all_contests_isolates_failures() {
        let contests = fetch_all_contests(&FakeSource).await;
        let ids: Vec<_> = contests.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["codeforces-1", "leetcode-1"]);
    }

    #[tokio::test]
    async fn test_platform_source_skips_disabled_endpoint() {
        let mut sources = SourceConfig::default();
        sources.leetcode = "  ".to_string();
        let source = PlatformApiSource::new(&HttpConfig::default(), &sources).unwrap();

        let contests = source.fetch_contests(Platform::Leetcode).await.unwrap();
        assert!(contests.is_empty());
    }

    #[test]
    fn test_apply_solution_links() {
        let mut contests = vec![
            contest("codeforces-1", Platform::Codeforces),
            contest("leetcode-1", Platform::Leetcode),
            contest("codechef-1", Platform::Codechef),
        ];
        let mut links = SolutionLinkMap::new();
        links.insert(
            "codeforces-1".to_string(),
            "https://www.youtube.com/watch?v=cf1".to_string(),
        );
        let mut playlists = PlaylistConfig::default();
        playlists.codechef = String::new();

        apply_solution_links(&mut contests, &links, &playlists);

        assert_eq!(
            contests[0].solution_link.as_deref(),
            Some("https://www.youtube.com/watch?v=cf1")
        );
        assert_eq!(
            contests[1].solution_link.as_deref(),
            Some(playlists.leetcode.as_str())
        );
        assert_eq!(contests[2].solution_link, None);
    }
}

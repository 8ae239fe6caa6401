//! Smart-match statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Platform;

/// Which matcher tier produced a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    Exact,
    Flexible,
    WordBased,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Flexible => "flexible",
            MatchType::WordBased => "word-based",
        }
    }
}

/// A contest that was linked to a playlist video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchedVideo {
    pub contest_name: String,
    pub video_title: String,
    pub match_type: MatchType,
}

/// Per-platform counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    /// Past contests of this platform, including skipped ones
    pub total: usize,
    pub matched: usize,
    /// Contests that already had a manual link
    pub skipped: usize,
    pub matched_videos: Vec<MatchedVideo>,
    /// Playlist fetch failure for this platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlatformStats {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn match_rate(&self) -> f64 {
        match_rate(self.matched, self.total, self.skipped)
    }
}

/// Aggregate counters for one smart-match run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatistics {
    pub total: usize,
    pub matched: usize,
    pub skipped: usize,
    pub match_rate: f64,
    pub platforms: BTreeMap<Platform, PlatformStats>,
    /// Set when the run was aborted before any platform was processed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MatchStatistics {
    /// Statistics for a run that could not start.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Recompute `match_rate` from the counters.
    pub fn finalize(&mut self) {
        self.match_rate = match_rate(self.matched, self.total, self.skipped);
    }
}

/// Percentage of processed contests that were matched.
///
/// Skipped contests are excluded from the denominator. Returns 0 when nothing
/// was processed.
pub fn match_rate(matched: usize, total: usize, skipped: usize) -> f64 {
    let processed = total.saturating_sub(skipped);
    if processed == 0 {
        return 0.0;
    }
    matched as f64 / processed as f64 * 100.0
}

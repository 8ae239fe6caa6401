// src/services/filter.rs

//! Contest listing filters.

use std::cmp::Ordering;

use crate::models::{Contest, ContestStatus, Platform};

/// Filter applied to contest listings.
///
/// The default filter keeps everything.
#[derive(Debug, Clone, Default)]
pub struct ContestFilter {
    /// Platforms to keep; empty keeps all
    pub platforms: Vec<Platform>,
    /// Status to keep; `None` keeps all
    pub status: Option<ContestStatus>,
    /// Keep only bookmarked contests
    pub bookmarked_only: bool,
}

impl ContestFilter {
    /// Whether a contest passes the filter.
    pub fn matches(&self, contest: &Contest, bookmarks: &[String]) -> bool {
        if !self.platforms.is_empty() && !self.platforms.contains(&contest.platform) {
            return false;
        }
        if self.status.is_some_and(|status| status != contest.status) {
            return false;
        }
        !self.bookmarked_only || bookmarks.iter().any(|id| *id == contest.id)
    }

    /// Keep matching contests, sorted with [`listing_order`].
    pub fn apply(&self, contests: Vec<Contest>, bookmarks: &[String]) -> Vec<Contest> {
        let mut kept: Vec<Contest> = contests
            .into_iter()
            .filter(|contest| self.matches(contest, bookmarks))
            .collect();
        kept.sort_by(listing_order);
        kept
    }
}

/// Display order: upcoming, ongoing, then past.
///
/// Upcoming and ongoing contests are soonest first; past contests are most
/// recently ended first.
pub fn listing_order(a: &Contest, b: &Contest) -> Ordering {
    fn rank(status: ContestStatus) -> u8 {
        match status {
            ContestStatus::Upcoming => 0,
            ContestStatus::Ongoing => 1,
            ContestStatus::Past => 2,
        }
    }

    rank(a.status)
        .cmp(&rank(b.status))
        .then_with(|| match a.status {
            ContestStatus::Past => b.end_time.cmp(&a.end_time),
            _ => a.start_time.cmp(&b.start_time),
        })
}

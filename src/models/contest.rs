//! Contest data structures.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Competitive programming platform a contest belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Codeforces,
    Codechef,
    Leetcode,
}

impl Platform {
    /// All platforms in processing order.
    pub const ALL: [Platform; 3] = [Platform::Codeforces, Platform::Codechef, Platform::Leetcode];

    /// Lower-case identifier used in JSON and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Codeforces => "codeforces",
            Platform::Codechef => "codechef",
            Platform::Leetcode => "leetcode",
        }
    }

    /// Human-readable platform name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Codeforces => "Codeforces",
            Platform::Codechef => "CodeChef",
            Platform::Leetcode => "LeetCode",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "codeforces" => Ok(Platform::Codeforces),
            "codechef" => Ok(Platform::Codechef),
            "leetcode" => Ok(Platform::Leetcode),
            other => Err(AppError::validation(format!("Unknown platform '{other}'"))),
        }
    }
}

/// Lifecycle state of a contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Upcoming,
    Ongoing,
    Past,
}

impl ContestStatus {
    /// Sort priority when statuses are mixed: ongoing, then upcoming, then past.
    pub fn priority(&self) -> u8 {
        match self {
            ContestStatus::Ongoing => 0,
            ContestStatus::Upcoming => 1,
            ContestStatus::Past => 2,
        }
    }
}

impl FromStr for ContestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upcoming" => Ok(ContestStatus::Upcoming),
            "ongoing" => Ok(ContestStatus::Ongoing),
            "past" => Ok(ContestStatus::Past),
            other => Err(AppError::validation(format!("Unknown contest status '{other}'"))),
        }
    }
}

/// A contest as delivered by a platform source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    /// Unique identifier (e.g. "codeforces-1930")
    pub id: String,

    /// Contest title as published by the platform
    pub name: String,

    pub platform: Platform,

    /// Contest page URL
    #[serde(default)]
    pub url: String,

    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ContestStatus,

    /// Solution video or playlist link, when one is attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_link: Option<String>,
}

impl Contest {
    pub fn is_past(&self) -> bool {
        self.status == ContestStatus::Past
    }
}

/// Ordering used inside a platform bucket.
///
/// Different statuses sort by [`ContestStatus::priority`]. Past contests sort
/// most recent first, upcoming and ongoing ones soonest first.
pub fn contest_order(a: &Contest, b: &Contest) -> Ordering {
    if a.status != b.status {
        return a.status.priority().cmp(&b.status.priority());
    }
    match a.status {
        ContestStatus::Past => b.start_time.cmp(&a.start_time),
        ContestStatus::Upcoming | ContestStatus::Ongoing => a.start_time.cmp(&b.start_time),
    }
}

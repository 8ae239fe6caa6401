// src/services/platforms/mod.rs

//! Normalizers for each platform's public contest API.
//!
//! Every parser takes the raw response body plus the current time and returns
//! [`Contest`](crate::models::Contest) values with platform-prefixed IDs.

pub mod codechef;
pub mod codeforces;
pub mod leetcode;

use chrono::{DateTime, Utc};

use crate::models::ContestStatus;

/// Status of a contest window at `now`.
pub(crate) fn status_at(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> ContestStatus {
    if now < start {
        ContestStatus::Upcoming
    } else if now < end {
        ContestStatus::Ongoing
    } else {
        ContestStatus::Past
    }
}

// src/services/platforms/codeforces.rs

//! Codeforces `contest.list` normalization.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::status_at;
use crate::error::{AppError, Result};
use crate::models::{Contest, ContestStatus, Platform};

const CONTEST_BASE_URL: &str = "https://codeforces.com/contest";

#[derive(Debug, Deserialize)]
struct ContestListResponse {
    status: String,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    result: Vec<RawContest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContest {
    id: u64,
    name: String,
    #[serde(default)]
    phase: String,
    start_time_seconds: Option<i64>,
    #[serde(default)]
    duration_seconds: i64,
}

/// Parse a `contest.list` response.
///
/// Entries without `startTimeSeconds` are dropped. Status comes from the
/// contest phase; unknown phases fall back to the contest window.
pub fn parse_contests(body: &str, now: DateTime<Utc>) -> Result<Vec<Contest>> {
    let response: ContestListResponse = serde_json::from_str(body)?;
    if response.status != "OK" {
        let reason = response.comment.unwrap_or(response.status);
        return Err(AppError::fetch("codeforces contest.list", reason));
    }

    let contests = response
        .result
        .into_iter()
        .filter_map(|raw| {
            let start = DateTime::from_timestamp(raw.start_time_seconds?, 0)?;
            let end = start + Duration::seconds(raw.duration_seconds);

            let status = match raw.phase.as_str() {
                "BEFORE" => ContestStatus::Upcoming,
                "CODING" => ContestStatus::Ongoing,
                "PENDING_SYSTEM_TEST" | "SYSTEM_TEST" | "FINISHED" => ContestStatus::Past,
                _ => status_at(start, end, now),
            };

            Some(Contest {
                id: format!("codeforces-{}", raw.id),
                name: raw.name,
                platform: Platform::Codeforces,
                url: format!("{}/{}", CONTEST_BASE_URL, raw.id),
                start_time: start,
                end_time: end,
                status,
                solution_link: None,
            })
        })
        .collect();

    Ok(contests)
}

// src/services/platforms/codechef.rs

//! CodeChef contest list normalization.
//!
//! The list endpoint groups contests into `present_contests`,
//! `future_contests` and `past_contests`; the group decides the status.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{Contest, ContestStatus, Platform};

const CONTEST_BASE_URL: &str = "https://www.codechef.com";

/// CodeChef publishes plain dates in Indian Standard Time.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

#[derive(Debug, Deserialize)]
struct ContestListResponse {
    #[serde(default)]
    status: Option<String>,
    present_contests: Option<Vec<RawContest>>,
    future_contests: Option<Vec<RawContest>>,
    past_contests: Option<Vec<RawContest>>,
}

#[derive(Debug, Deserialize)]
struct RawContest {
    contest_code: String,
    contest_name: String,
    contest_start_date_iso: Option<String>,
    contest_end_date_iso: Option<String>,
    contest_start_date: Option<String>,
    contest_end_date: Option<String>,
}

/// Parse a contest list response.
///
/// Entries whose dates cannot be read are dropped. Any contest whose window
/// contains `now` is marked ongoing regardless of its group.
pub fn parse_contests(body: &str, now: DateTime<Utc>) -> Result<Vec<Contest>> {
    let response: ContestListResponse = serde_json::from_str(body)?;
    if response.status.as_deref() != Some("success")
        && response.future_contests.is_none()
        && response.past_contests.is_none()
    {
        return Err(AppError::fetch(
            "codechef contest list",
            "unexpected response format",
        ));
    }

    let groups = [
        (response.present_contests, ContestStatus::Ongoing),
        (response.future_contests, ContestStatus::Upcoming),
        (response.past_contests, ContestStatus::Past),
    ];

    let mut contests = Vec::new();
    for (group, status) in groups {
        for raw in group.unwrap_or_default() {
            match to_contest(raw, status, now) {
                Some(contest) => contests.push(contest),
                None => log::debug!("Skipping CodeChef contest with unreadable dates"),
            }
        }
    }
    Ok(contests)
}

fn to_contest(raw: RawContest, status: ContestStatus, now: DateTime<Utc>) -> Option<Contest> {
    let start = parse_date(
        raw.contest_start_date_iso.as_deref(),
        raw.contest_start_date.as_deref(),
    )?;
    let end = parse_date(
        raw.contest_end_date_iso.as_deref(),
        raw.contest_end_date.as_deref(),
    )?;

    let status = if now >= start && now < end {
        ContestStatus::Ongoing
    } else {
        status
    };

    Some(Contest {
        id: format!("codechef-{}", raw.contest_code),
        url: format!("{}/{}", CONTEST_BASE_URL, raw.contest_code),
        name: raw.contest_name,
        platform: Platform::Codechef,
        start_time: start,
        end_time: end,
        status,
        solution_link: None,
    })
}

/// Read the ISO date, else the plain `"06 Mar 2024  20:00:00"` form.
fn parse_date(iso: Option<&str>, plain: Option<&str>) -> Option<DateTime<Utc>> {
    if let Some(date) = iso.and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok()) {
        return Some(date.with_timezone(&Utc));
    }

    let plain = plain?.split_whitespace().collect::<Vec<_>>().join(" ");
    let naive = NaiveDateTime::parse_from_str(&plain, "%d %b %Y %H:%M:%S").ok()?;
    let ist = FixedOffset::east_opt(IST_OFFSET_SECS)?;
    ist.from_local_datetime(&naive)
        .single()
        .map(|date| date.with_timezone(&Utc))
}

// src/services/platforms/leetcode.rs

//! LeetCode GraphQL contest normalization.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::json;

use super::status_at;
use crate::error::{AppError, Result};
use crate::models::{Contest, ContestStatus, Platform};

const CONTEST_BASE_URL: &str = "https://leetcode.com/contest";

/// Contest length assumed when the API omits `duration`.
const DEFAULT_DURATION_SECS: i64 = 90 * 60;

/// Past contests requested per fetch.
pub const PAST_PAGE_SIZE: u32 = 20;

const CONTESTS_QUERY: &str = "query contests($pageNo: Int, $numPerPage: Int) { \
    upcomingContests { title titleSlug startTime duration } \
    pastContests(pageNo: $pageNo, numPerPage: $numPerPage) { \
        data { title titleSlug startTime duration } \
    } }";

/// GraphQL request body for upcoming and recent past contests.
pub fn request_body() -> serde_json::Value {
    json!({
        "operationName": "contests",
        "query": CONTESTS_QUERY,
        "variables": { "pageNo": 1, "numPerPage": PAST_PAGE_SIZE },
    })
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ContestData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContestData {
    #[serde(default)]
    upcoming_contests: Option<Vec<RawContest>>,
    #[serde(default)]
    past_contests: Option<PastPage>,
}

#[derive(Debug, Deserialize)]
struct PastPage {
    #[serde(default)]
    data: Vec<RawContest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContest {
    title: String,
    title_slug: String,
    start_time: i64,
    duration: Option<i64>,
}

/// Parse a GraphQL contests response.
///
/// Past contests come first; an upcoming entry whose slug was already seen is
/// dropped. Upcoming contests whose window contains `now` are ongoing.
pub fn parse_contests(body: &str, now: DateTime<Utc>) -> Result<Vec<Contest>> {
    let response: GraphQlResponse = serde_json::from_str(body)?;
    let Some(data) = response.data else {
        let message = response
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(AppError::fetch("leetcode graphql", message));
    };

    let past = data.past_contests.map(|page| page.data).unwrap_or_default();
    let upcoming = data.upcoming_contests.unwrap_or_default();

    let mut seen = HashSet::new();
    let mut contests = Vec::new();
    for (raw, is_past) in past
        .into_iter()
        .map(|raw| (raw, true))
        .chain(upcoming.into_iter().map(|raw| (raw, false)))
    {
        if !seen.insert(raw.title_slug.clone()) {
            continue;
        }
        if let Some(contest) = to_contest(raw, is_past, now) {
            contests.push(contest);
        }
    }
    Ok(contests)
}

fn to_contest(raw: RawContest, is_past: bool, now: DateTime<Utc>) -> Option<Contest> {
    let start = DateTime::from_timestamp(raw.start_time, 0)?;
    let end = start + Duration::seconds(raw.duration.unwrap_or(DEFAULT_DURATION_SECS));

    let status = match (is_past, status_at(start, end, now)) {
        (true, _) => ContestStatus::Past,
        (false, ContestStatus::Ongoing) => ContestStatus::Ongoing,
        (false, _) => ContestStatus::Upcoming,
    };

    Some(Contest {
        id: format!("leetcode-{}", raw.title_slug),
        url: format!("{}/{}", CONTEST_BASE_URL, raw.title_slug),
        name: raw.title,
        platform: Platform::Leetcode,
        start_time: start,
        end_time: end,
        status,
        solution_link: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FIXTURE: &str = r#"{"data": {
        "upcomingContests": [
            {"title": "Weekly Contest 445", "titleSlug": "weekly-contest-445",
             "startTime": 1745116200, "duration": 5400, "__typename": "ContestNode"},
            {"title": "Biweekly Contest 154", "titleSlug": "biweekly-contest-154",
             "startTime": 1744986600}
        ],
        "pastContests": {"data": [
            {"title": "Weekly Contest 390", "titleSlug": "weekly-contest-390",
             "startTime": 1710642600, "duration": 5400},
            {"title": "Biweekly Contest 126", "titleSlug": "biweekly-contest-126",
             "startTime": 1710599400, "duration": 5400}
        ]}
    }}"#;

    #[test]
    fn test_parse_past_and_upcoming() {
        // 2025-04-18 15:00 UTC, half an hour into Biweekly 154.
        let now = Utc.with_ymd_and_hms(2025, 4, 18, 15, 0, 0).unwrap();
        let contests = parse_contests(FIXTURE, now).unwrap();

        let summary: Vec<_> = contests
            .iter()
            .map(|c| (c.id.as_str(), c.status))
            .collect();
        assert_eq!(
            summary,
            [
                ("leetcode-weekly-contest-390", ContestStatus::Past),
                ("leetcode-biweekly-contest-126", ContestStatus::Past),
                ("leetcode-weekly-contest-445", ContestStatus::Upcoming),
                ("leetcode-biweekly-contest-154", ContestStatus::Ongoing),
            ]
        );
        assert_eq!(contests[0].name, "Weekly Contest 390");
        assert_eq!(
            contests[0].url,
            "https://leetcode.com/contest/weekly-contest-390"
        );
        assert_eq!(
            (contests[3].end_time - contests[3].start_time).num_seconds(),
            DEFAULT_DURATION_SECS
        );
    }

    #[test]
    fn test_duplicate_slug_is_dropped() {
        let body = r#"{"data": {
            "upcomingContests": [
                {"title": "Weekly Contest 390", "titleSlug": "weekly-contest-390", "startTime": 1710642600}
            ],
            "pastContests": {"data": [
                {"title": "Weekly Contest 390", "titleSlug": "weekly-contest-390", "startTime": 1710642600}
            ]}
        }}"#;
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let contests = parse_contests(body, now).unwrap();
        assert_eq!(contests.len(), 1);
        assert_eq!(contests[0].status, ContestStatus::Past);
    }

    #[test]
    fn test_graphql_errors_are_reported() {
        let body = r#"{"data": null, "errors": [{"message": "rate limited"}]}"#;
        let err = parse_contests(body, Utc::now()).unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn test_request_body_asks_for_both_lists() {
        let body = request_body();
        let query = body["query"].as_str().unwrap();
        assert!(query.contains("upcomingContests"));
        assert!(query.contains("pastContests"));
        assert_eq!(body["variables"]["numPerPage"], PAST_PAGE_SIZE);
    }
}

// src/services/extractor.rs

//! Round-number extraction from contest titles.
//!
//! Turns a title such as `"Codeforces Round 1010 (Div. 1, Unrated)"` into the
//! identifier solution videos are usually titled with (`"Round 1010"`).
//! Platform keywords in the title decide which patterns apply.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Platform;

static EDUCATIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Educational\s+(?:Codeforces\s+)?Round\s+[0-9]+").expect("valid round regex")
});
static GLOBAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Global\s+Round\s+[0-9]+").expect("valid round regex"));
static ROUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Round\s+[0-9]+").expect("valid round regex"));

static COOK_OFF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Cook[- ]Off\s+[0-9]+").expect("valid round regex"));
static LUNCHTIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Lunchtime\s+[0-9]+").expect("valid round regex"));
// Any "(Rated till 5 star)" style qualifier after the number is left out.
static STARTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Starters\s+[0-9]+").expect("valid round regex"));

static WEEKLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Weekly\s+Contest\s+[0-9]+").expect("valid round regex"));
static BIWEEKLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Biweekly\s+Contest\s+[0-9]+").expect("valid round regex"));

static GENERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:round|contest)\s+[0-9]+").expect("valid round regex"));

/// Detect which platform a raw title names, if any.
///
/// Keywords are checked in the order codeforces, codechef, leetcode.
pub fn classify_title(title: &str) -> Option<Platform> {
    let lower = title.to_lowercase();
    if lower.contains("codeforces") {
        Some(Platform::Codeforces)
    } else if lower.contains("codechef") {
        Some(Platform::Codechef)
    } else if lower.contains("leetcode") {
        Some(Platform::Leetcode)
    } else {
        None
    }
}

/// Extract the round identifier from a contest title.
///
/// Returns the matched text in its original casing, e.g. `"Starters 177"`
/// for `"CodeChef Starters 177 (Rated till 5 star)"`. Returns `None` when no
/// pattern applies.
pub fn extract_round_number(title: &str) -> Option<String> {
    let lower = title.to_lowercase();

    let by_platform = match classify_title(title) {
        Some(Platform::Codeforces) => codeforces_round(title, &lower),
        Some(Platform::Codechef) => first_match(&COOK_OFF, title)
            .or_else(|| first_match(&LUNCHTIME, title))
            .or_else(|| first_match(&STARTERS, title)),
        Some(Platform::Leetcode) => {
            first_match(&WEEKLY, title).or_else(|| first_match(&BIWEEKLY, title))
        }
        None => None,
    };

    by_platform
        .or_else(|| {
            if lower.contains("starters") {
                first_match(&STARTERS, title)
            } else {
                None
            }
        })
        .or_else(|| first_match(&GENERIC, title))
}

fn codeforces_round(title: &str, lower: &str) -> Option<String> {
    let educational = if lower.contains("educational") {
        first_match(&EDUCATIONAL, title)
    } else {
        None
    };

    educational
        .or_else(|| {
            if lower.contains("global") {
                first_match(&GLOBAL, title)
            } else {
                None
            }
        })
        .or_else(|| first_match(&ROUND, title))
}

fn first_match(re: &Regex, title: &str) -> Option<String> {
    re.find(title).map(|m| m.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(title: &str) -> Option<String> {
        extract_round_number(title)
    }

    #[test]
    fn test_classify_title() {
        assert_eq!(
            classify_title("Codeforces Round 930 (Div. 1)"),
            Some(Platform::Codeforces)
        );
        assert_eq!(classify_title("CODECHEF Starters 80"), Some(Platform::Codechef));
        assert_eq!(
            classify_title("LeetCode Weekly Contest 390"),
            Some(Platform::Leetcode)
        );
        assert_eq!(classify_title("Starters 174"), None);
    }

    #[test]
    fn test_codeforces_regular_round() {
        assert_eq!(extract("Codeforces Round 930 (Div. 1)").as_deref(), Some("Round 930"));
        assert_eq!(
            extract("Codeforces Round 1010 (Div. 1, Unrated)").as_deref(),
            Some("Round 1010")
        );
        assert_eq!(extract("codeforces round 77").as_deref(), Some("round 77"));
    }

    #[test]
    fn test_codeforces_educational_round() {
        assert_eq!(
            extract("Codeforces Educational Round 150").as_deref(),
            Some("Educational Round 150")
        );
        assert_eq!(
            extract("Educational Codeforces Round 163 (Rated for Div. 2)").as_deref(),
            Some("Educational Codeforces Round 163")
        );
    }

    #[test]
    fn test_codeforces_global_round() {
        assert_eq!(
            extract("Codeforces Global Round 25").as_deref(),
            Some("Global Round 25")
        );
    }

    #[test]
    fn test_codeforces_educational_without_number_falls_back() {
        assert_eq!(
            extract("Codeforces Round 900 educational mirror").as_deref(),
            Some("Round 900")
        );
    }

    #[test]
    fn test_codechef_starters_strips_qualifier() {
        assert_eq!(
            extract("CodeChef Starters 177 (Rated till 5 star)").as_deref(),
            Some("Starters 177")
        );
        assert_eq!(extract("CodeChef Starters 80").as_deref(), Some("Starters 80"));
    }

    #[test]
    fn test_codechef_cook_off_and_lunchtime() {
        assert_eq!(
            extract("CodeChef Cook-Off 162").as_deref(),
            Some("Cook-Off 162")
        );
        assert_eq!(
            extract("CodeChef Cook Off 140").as_deref(),
            Some("Cook Off 140")
        );
        assert_eq!(
            extract("CodeChef Lunchtime 110").as_deref(),
            Some("Lunchtime 110")
        );
    }

    #[test]
    fn test_starters_without_platform_keyword() {
        assert_eq!(
            extract("Starters 174 (Rated upto 2700)").as_deref(),
            Some("Starters 174")
        );
    }

    #[test]
    fn test_leetcode_weekly_and_biweekly() {
        assert_eq!(
            extract("LeetCode Weekly Contest 390").as_deref(),
            Some("Weekly Contest 390")
        );
        assert_eq!(
            extract("LeetCode Biweekly Contest 105").as_deref(),
            Some("weekly Contest 105")
        );
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(extract("Weekly Contest 390").as_deref(), Some("Contest 390"));
        assert_eq!(extract("AtCoder Beginner Contest 350").as_deref(), Some("Contest 350"));
        assert_eq!(extract("CodeChef Long Challenge round 3").as_deref(), Some("round 3"));
    }

    #[test]
    fn test_biweekly_title_exact_matches_weekly_video() {
        let round = extract("LeetCode Biweekly Contest 105");
        let videos = vec![crate::models::PlaylistVideo {
            video_id: "lc105".to_string(),
            title: "LeetCode Weekly Contest 105 Solutions".to_string(),
            description: String::new(),
            published_at: chrono::Utc::now(),
            thumbnail_url: String::new(),
        }];
        let hit = crate::services::match_video(
            "LeetCode Biweekly Contest 105",
            Platform::Leetcode,
            round.as_deref(),
            &videos,
        )
        .unwrap();
        assert_eq!(hit.match_type, crate::models::MatchType::Exact);
    }

    #[test]
    fn test_non_ascii_digits_are_not_round_numbers() {
        assert_eq!(extract("Codeforces Round \u{663}\u{660}"), None);
        assert_eq!(extract("Codeforces Round \u{ff11}\u{ff12}"), None);
        assert_eq!(extract("Codeforces Round 12\u{ff13}").as_deref(), Some("Round 12"));
    }

    #[test]
    fn test_no_round_number() {
        assert_eq!(extract("CodeChef June Long Challenge"), None);
        assert_eq!(extract(""), None);
        assert_eq!(extract("Starters"), None);
    }
}

// src/services/matcher.rs

//! Tiered matching of a contest against playlist videos.
//!
//! Tiers are tried in order and the first hit wins:
//!
//! 1. **exact**: the video title contains the round identifier verbatim
//! 2. **flexible**: the title contains the round's number plus a
//!    platform-specific keyword
//! 3. **word-based**: only when no round identifier exists; the title
//!    contains enough of the contest name's significant words

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{MatchType, Platform, PlaylistVideo};

/// Fraction of significant words a title must contain in the word-based tier.
pub const WORD_COVERAGE: f64 = 0.66;

/// Words of this length or shorter are ignored in the word-based tier.
pub const MIN_WORD_LEN: usize = 3;

/// Words ignored in the word-based tier regardless of length.
pub const STOP_WORDS: [&str; 5] = ["round", "contest", "the", "and", "div"];

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid digits regex"));

/// A playlist video selected for a contest.
#[derive(Debug, Clone, Copy)]
pub struct VideoMatch<'a> {
    pub video: &'a PlaylistVideo,
    pub match_type: MatchType,
}

/// Find the video that covers a contest.
///
/// `round_id` is the output of
/// [`extract_round_number`](super::extractor::extract_round_number) for the
/// contest name. Returns `None` when no tier matches; callers then use
/// [`fallback_link`].
pub fn match_video<'a>(
    name: &str,
    platform: Platform,
    round_id: Option<&str>,
    videos: &'a [PlaylistVideo],
) -> Option<VideoMatch<'a>> {
    match round_id {
        Some(round_id) => exact_match(round_id, videos)
            .map(|video| VideoMatch {
                video,
                match_type: MatchType::Exact,
            })
            .or_else(|| {
                flexible_match(name, platform, round_id, videos).map(|video| VideoMatch {
                    video,
                    match_type: MatchType::Flexible,
                })
            }),
        None => word_match(name, videos).map(|video| VideoMatch {
            video,
            match_type: MatchType::WordBased,
        }),
    }
}

/// Link used when [`match_video`] finds nothing.
///
/// CodeChef Starters contests get the first Starters video in the playlist;
/// everything else gets the playlist itself.
pub fn fallback_link(
    name: &str,
    platform: Platform,
    videos: &[PlaylistVideo],
    playlist_url: &str,
) -> String {
    if platform == Platform::Codechef && name.to_lowercase().contains("starters") {
        if let Some(video) = videos
            .iter()
            .find(|v| v.title.to_lowercase().contains("starters"))
        {
            return video.watch_url();
        }
    }
    playlist_url.to_string()
}

fn exact_match<'a>(round_id: &str, videos: &'a [PlaylistVideo]) -> Option<&'a PlaylistVideo> {
    let needle = round_id.to_lowercase();
    videos
        .iter()
        .find(|video| video.title.to_lowercase().contains(&needle))
}

fn flexible_match<'a>(
    name: &str,
    platform: Platform,
    round_id: &str,
    videos: &'a [PlaylistVideo],
) -> Option<&'a PlaylistVideo> {
    let number = DIGITS.find(round_id)?.as_str();
    let name = name.to_lowercase();

    videos.iter().find(|video| {
        let title = video.title.to_lowercase();
        let has_number = title.contains(number);

        match platform {
            Platform::Codeforces => title.contains("round") && has_number,
            Platform::Leetcode => {
                (title.contains("weekly") || title.contains("biweekly"))
                    && title.contains("contest")
                    && has_number
            }
            Platform::Codechef => {
                if name.contains("starters") {
                    // Covers "CodeChef Starters N" titles as well.
                    title.contains("starters") && has_number
                } else if name.contains("cook") {
                    title.contains("cook") && has_number
                } else if name.contains("lunchtime") {
                    title.contains("lunchtime") && has_number
                } else {
                    (title.contains("codechef") || title.contains("chef")) && has_number
                }
            }
        }
    })
}

/// Lower-cased words of a contest name that carry meaning for matching.
pub fn significant_words(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_WORD_LEN && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Minimum number of significant words a title must contain.
pub fn required_word_hits(word_count: usize) -> usize {
    (word_count as f64 * WORD_COVERAGE).ceil() as usize
}

fn word_match<'a>(name: &str, videos: &'a [PlaylistVideo]) -> Option<&'a PlaylistVideo> {
    let words = significant_words(name);
    if words.is_empty() {
        return None;
    }
    let required = required_word_hits(words.len());

    videos.iter().find(|video| {
        let title = video.title.to_lowercase();
        words.iter().filter(|word| title.contains(word.as_str())).count() >= required
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::extractor::extract_round_number;
    use chrono::Utc;

    fn video(id: &str, title: &str) -> PlaylistVideo {
        PlaylistVideo {
            video_id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            published_at: Utc::now(),
            thumbnail_url: String::new(),
        }
    }

    fn run<'a>(
        name: &str,
        platform: Platform,
        videos: &'a [PlaylistVideo],
    ) -> Option<VideoMatch<'a>> {
        let round_id = extract_round_number(name);
        match_video(name, platform, round_id.as_deref(), videos)
    }

    #[test]
    fn test_exact_match() {
        let videos = vec![
            video("a", "Codeforces Round 929 (Div 3) Solutions"),
            video("b", "Codeforces Round 930 (Div 1) Solutions"),
        ];
        let hit = match_video(
            "Codeforces Round 930 (Div. 1)",
            Platform::Codeforces,
            Some("Round 930"),
            &videos,
        )
        .unwrap();
        assert_eq!(hit.video.video_id, "b");
        assert_eq!(hit.match_type, MatchType::Exact);
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let videos = vec![video("a", "LEETCODE WEEKLY CONTEST 390 | ALL PROBLEMS")];
        let hit = run("LeetCode Weekly Contest 390", Platform::Leetcode, &videos).unwrap();
        assert_eq!(hit.match_type, MatchType::Exact);
    }

    #[test]
    fn test_flexible_match_codechef_starters() {
        let videos = vec![
            video("a", "CodeChef Lunchtime 80 Editorial"),
            video("b", "CodeChef 80 Starters Problems"),
        ];
        let hit = match_video(
            "CodeChef Starters 80",
            Platform::Codechef,
            Some("Starters 80"),
            &videos,
        )
        .unwrap();
        assert_eq!(hit.video.video_id, "b");
        assert_eq!(hit.match_type, MatchType::Flexible);
    }

    #[test]
    fn test_flexible_match_codeforces_hash_round() {
        let videos = vec![video("a", "Codeforces Round #799 (Div. 4) | Problem A-F Explained")];
        let hit = run("Codeforces Round 799 (Div. 4)", Platform::Codeforces, &videos).unwrap();
        assert_eq!(hit.match_type, MatchType::Flexible);
    }

    #[test]
    fn test_flexible_match_leetcode_requires_contest_keyword() {
        let videos = vec![
            video("a", "Weekly 391 recap"),
            video("b", "Weekly #391 contest walkthrough"),
        ];
        let hit = run("LeetCode Weekly Contest 391", Platform::Leetcode, &videos).unwrap();
        assert_eq!(hit.video.video_id, "b");
        assert_eq!(hit.match_type, MatchType::Flexible);
    }

    #[test]
    fn test_flexible_match_codechef_cook_off() {
        let videos = vec![video("a", "Cook off #162 all problems")];
        let hit = run("CodeChef Cook-Off 162", Platform::Codechef, &videos).unwrap();
        assert_eq!(hit.match_type, MatchType::Flexible);
    }

    #[test]
    fn test_flexible_match_codechef_lunchtime() {
        let videos = vec![
            video("a", "Cook-Off 110 walkthrough"),
            video("b", "Lunchtime #110 editorial"),
        ];
        let hit = run("CodeChef Lunchtime 110", Platform::Codechef, &videos).unwrap();
        assert_eq!(hit.video.video_id, "b");
        assert_eq!(hit.match_type, MatchType::Flexible);
    }

    #[test]
    fn test_flexible_match_ignores_non_ascii_digits() {
        let videos = vec![video("a", "Codeforces Round \u{663}\u{660} Solutions")];
        let hit = match_video(
            "Codeforces Round 30",
            Platform::Codeforces,
            Some("Round 30"),
            &videos,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_flexible_match_generic_codechef() {
        let videos = vec![
            video("a", "Chef and Round 12 hints"),
            video("b", "Unrelated 12"),
        ];
        let hit = match_video(
            "CodeChef Long Round 12",
            Platform::Codechef,
            Some("Round 12"),
            &videos,
        );
        // "round 12" is contained verbatim, so the exact tier wins first.
        assert_eq!(hit.unwrap().match_type, MatchType::Exact);

        let videos = vec![video("a", "Chef special 12 walkthrough")];
        let hit = match_video(
            "CodeChef Long Round 12",
            Platform::Codechef,
            Some("Round 12"),
            &videos,
        )
        .unwrap();
        assert_eq!(hit.match_type, MatchType::Flexible);
    }

    #[test]
    fn test_round_id_without_hits_skips_word_tier() {
        let videos = vec![video("a", "Codeforces Div 2 Problem Solving Session")];
        assert!(run("Codeforces Round 931 (Div. 2)", Platform::Codeforces, &videos).is_none());
    }

    #[test]
    fn test_word_based_match() {
        let videos = vec![
            video("a", "Long Challenge May Solutions"),
            video("b", "CodeChef June Long Challenge Solutions"),
        ];
        let hit = run("CodeChef June Long Challenge", Platform::Codechef, &videos).unwrap();
        assert_eq!(hit.video.video_id, "b");
        assert_eq!(hit.match_type, MatchType::WordBased);
    }

    #[test]
    fn test_word_based_partial_coverage() {
        // 3 significant words need ceil(3 * 0.66) = 2 hits.
        let videos = vec![video("a", "June Challenge recap")];
        let hit = run("Codechef June Challenge", Platform::Codechef, &videos).unwrap();
        assert_eq!(hit.match_type, MatchType::WordBased);

        let videos = vec![video("a", "June recap")];
        assert!(run("Codechef June Challenge", Platform::Codechef, &videos).is_none());
    }

    #[test]
    fn test_significant_words_filter() {
        assert_eq!(
            significant_words("The Long DIV and Challenge Contest"),
            vec!["long".to_string(), "challenge".to_string()]
        );
        assert!(significant_words("the and div abc").is_empty());
    }

    #[test]
    fn test_required_word_hits() {
        assert_eq!(required_word_hits(1), 1);
        assert_eq!(required_word_hits(2), 2);
        assert_eq!(required_word_hits(3), 2);
        assert_eq!(required_word_hits(4), 3);
    }

    #[test]
    fn test_no_significant_words_no_match() {
        let videos = vec![video("a", "the and div")];
        assert!(run("The Div", Platform::Codeforces, &videos).is_none());
    }

    #[test]
    fn test_fallback_codechef_starters_video() {
        let videos = vec![
            video("a", "Lunchtime editorial"),
            video("b", "Starters 75 Solutions"),
        ];
        let link = fallback_link(
            "Starters 999 (Rated)",
            Platform::Codechef,
            &videos,
            "https://www.youtube.com/playlist?list=PL1",
        );
        assert_eq!(link, "https://www.youtube.com/watch?v=b");
    }

    #[test]
    fn test_fallback_playlist_url() {
        let videos = vec![video("b", "Starters 75 Solutions")];
        let playlist = "https://www.youtube.com/playlist?list=PL1";
        assert_eq!(
            fallback_link("Codeforces Round 1", Platform::Codeforces, &videos, playlist),
            playlist
        );
        assert_eq!(
            fallback_link("Starters 999", Platform::Codechef, &[], playlist),
            playlist
        );
    }
}

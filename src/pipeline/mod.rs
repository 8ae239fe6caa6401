// src/pipeline/mod.rs

//! Pipeline entry points for solution linking.
//!
//! - `run_smart_match`: Match past contests to playlist videos and persist links
//! - `find_video_for_contest`: Look up the solution link for a single contest

pub mod lookup;
pub mod smart_match;

pub use lookup::find_video_for_contest;
pub use smart_match::{
    MISSING_API_KEY, SmartMatchOutcome, SmartMatchReport, SmartMatcher, bucket_by_platform,
    merge_links, run_smart_match,
};

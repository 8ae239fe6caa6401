// src/models/mod.rs

//! Domain models for the solution linker.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod contest;
mod stats;
mod video;

// Re-export all public types
pub use config::{
    Config, HttpConfig, MAX_PLAYLIST_RESULTS, PlaylistConfig, SourceConfig, YouTubeConfig,
};
pub use contest::{Contest, ContestStatus, Platform, contest_order};
pub use stats::{MatchStatistics, MatchType, MatchedVideo, PlatformStats, match_rate};
pub use video::PlaylistVideo;

/// Persisted `contestId -> solution URL` associations.
pub type SolutionLinkMap = std::collections::BTreeMap<String, String>;

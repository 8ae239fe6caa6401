//! Service layer for the solution linker.
//!
//! This module contains the business logic for:
//! - Round-number extraction from contest titles (`extractor`)
//! - Tiered contest-to-video matching (`matcher`)
//! - YouTube playlist fetching (`YouTubeClient`)
//! - Contest list fetching and normalization (`PlatformApiSource`, `platforms`)
//! - Contest filtering for listings (`filter`)

pub mod contests;
pub mod extractor;
pub mod filter;
pub mod matcher;
pub mod platforms;
pub mod youtube;

pub use contests::{ContestSource, PlatformApiSource, apply_solution_links, fetch_all_contests};
pub use extractor::{classify_title, extract_round_number};
pub use filter::{ContestFilter, listing_order};
pub use matcher::{VideoMatch, fallback_link, match_video};
pub use youtube::{VideoSource, YouTubeClient, extract_playlist_id};

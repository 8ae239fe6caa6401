// src/lib.rs

//! Contest Linker Library
//!
//! Links past programming contests to their solution videos in per-platform
//! YouTube playlists.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

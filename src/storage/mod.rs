//! Storage abstractions for persisted solution links.
//!
//! Values are opaque string blobs addressed by a key, the same model as a
//! browser's `localStorage`. Solution links live in one JSON blob under
//! [`SOLUTION_LINKS_KEY`], bookmarks in one JSON array under [`BOOKMARKS_KEY`].
//!
//! ## Directory Structure (LocalStorage)
//!
//! ```text
//! storage/
//! ├── config.toml                           # Linker configuration
//! ├── contest-tracker-bookmarks.json        # bookmarked contest IDs
//! └── contest-tracker-solution-links.json   # contestId -> video URL
//! ```

pub mod bookmarks;
pub mod links;
pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use bookmarks::{BOOKMARKS_KEY, BookmarkStore};
pub use links::{SOLUTION_LINKS_KEY, SolutionLinkStore};
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Trait for key-value storage backends.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if it was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

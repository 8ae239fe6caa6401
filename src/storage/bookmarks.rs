//! Persisted contest bookmarks.
//!
//! Bookmarked contest IDs are kept as one JSON array in insertion order.

use crate::error::Result;
use crate::storage::KeyValueStore;

/// Storage key of the bookmark blob.
pub const BOOKMARKS_KEY: &str = "contest-tracker-bookmarks";

/// Bookmark store on top of a key-value backend.
pub struct BookmarkStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> BookmarkStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Read all bookmarked contest IDs. Missing or unreadable data is empty.
    pub async fn get(&self) -> Result<Vec<String>> {
        let Some(blob) = self.store.get(BOOKMARKS_KEY).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&blob) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                log::warn!("Ignoring unreadable bookmarks: {}", e);
                Ok(Vec::new())
            }
        }
    }

    pub async fn is_bookmarked(&self, contest_id: &str) -> Result<bool> {
        Ok(self.get().await?.iter().any(|id| id == contest_id))
    }

    /// Add or remove a bookmark. Returns whether the contest is now bookmarked.
    pub async fn toggle(&self, contest_id: &str) -> Result<bool> {
        let mut ids = self.get().await?;
        let bookmarked = match ids.iter().position(|id| id == contest_id) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(contest_id.to_string());
                true
            }
        };

        self.store
            .put(BOOKMARKS_KEY, &serde_json::to_string(&ids)?)
            .await?;
        if bookmarked {
            log::info!("Added contest {} to bookmarks", contest_id);
        } else {
            log::info!("Removed contest {} from bookmarks", contest_id);
        }
        Ok(bookmarked)
    }

    /// Drop every bookmark.
    pub async fn clear(&self) -> Result<()> {
        self.store.delete(BOOKMARKS_KEY).await
    }
}

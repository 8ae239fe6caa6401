//! Persisted solution links.
//!
//! All links are kept in one JSON object (`contestId -> URL`). Every update
//! reads, modifies and rewrites the whole blob; concurrent writers can lose
//! updates.

use crate::error::Result;
use crate::models::SolutionLinkMap;
use crate::storage::KeyValueStore;

/// Storage key of the solution link blob.
pub const SOLUTION_LINKS_KEY: &str = "contest-tracker-solution-links";

/// Solution link store on top of a key-value backend.
pub struct SolutionLinkStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SolutionLinkStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Read all saved links.
    ///
    /// A missing blob is an empty map. So is an unparsable one, after a
    /// warning; backend I/O errors are returned.
    pub async fn get(&self) -> Result<SolutionLinkMap> {
        let Some(blob) = self.store.get(SOLUTION_LINKS_KEY).await? else {
            return Ok(SolutionLinkMap::new());
        };
        match serde_json::from_str(&blob) {
            Ok(links) => Ok(links),
            Err(e) => {
                log::warn!("Ignoring unreadable solution links: {}", e);
                Ok(SolutionLinkMap::new())
            }
        }
    }

    /// Add or replace the link for one contest.
    pub async fn set(&self, contest_id: &str, url: &str) -> Result<()> {
        let mut links = self.get().await?;
        links.insert(contest_id.to_string(), url.to_string());
        self.replace_all(&links).await?;
        log::info!("Solution link saved for contest {}: {}", contest_id, url);
        Ok(())
    }

    /// Remove the link for one contest. Returns whether a link existed.
    pub async fn remove(&self, contest_id: &str) -> Result<bool> {
        let mut links = self.get().await?;
        if links.remove(contest_id).is_none() {
            return Ok(false);
        }
        self.replace_all(&links).await?;
        log::info!("Solution link removed for contest {}", contest_id);
        Ok(true)
    }

    /// Overwrite the whole blob.
    pub async fn replace_all(&self, links: &SolutionLinkMap) -> Result<()> {
        let blob = serde_json::to_string(links)?;
        self.store.put(SOLUTION_LINKS_KEY, &blob).await
    }
}

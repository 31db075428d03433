//! Store traits for the engagement engine.
//!
//! The document database is an external collaborator. The engine reaches it
//! only through these two traits, so any backend (the real database client,
//! the JSON file store, the in-memory store) can sit behind them.

use async_trait::async_trait;

use crate::core::{ContentRecord, HistoricalFlag, UserProfileRecord};
use crate::error::Result;

/// Read access to the pool of content records.
///
/// Reads are eventually consistent. Two calls issued moments apart may see
/// different snapshots.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch every currently visible content record.
    async fn fetch_all(&self) -> Result<Vec<ContentRecord>>;

    /// Fetch the records authored by `author_id`.
    ///
    /// The default filters [`fetch_all`](Self::fetch_all). Backends with an
    /// index on the author field should override it.
    async fn fetch_by_author(&self, author_id: &str) -> Result<Vec<ContentRecord>> {
        let mut records = self.fetch_all().await?;
        records.retain(|r| r.is_authored_by(author_id));
        Ok(records)
    }
}

/// Access to user profile records.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for `user_id`.
    ///
    /// Returns `Ok(None)` if the profile doesn't exist.
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfileRecord>>;

    /// Set a historical flag if it is not already set.
    ///
    /// Creates the profile when absent. Returns `Ok(true)` when the flag
    /// transitioned from false to true and `Ok(false)` when it was already
    /// set. There is deliberately no operation that clears a flag.
    async fn mark_flag(&self, user_id: &str, flag: HistoricalFlag) -> Result<bool>;
}

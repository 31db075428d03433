//! In-memory content and profile stores.
//!
//! Thread-safe implementations of the store traits, used in tests and when
//! the engine is embedded next to an already-loaded snapshot.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::core::{ContentRecord, HistoricalFlag, UserProfileRecord};
use crate::error::{EngagementError, Result};
use crate::storage::{ContentStore, ProfileStore};

/// In-memory content store.
///
/// Records are kept in insertion order and lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    records: RwLock<Vec<ContentRecord>>,
}

impl MemoryContentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records`.
    pub fn with_records(records: Vec<ContentRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Add a record, replacing any existing record with the same id.
    pub fn insert(&self, record: ContentRecord) {
        let mut records = write(&self.records);
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    /// Remove a record by id. Returns whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        let mut records = write(&self.records);
        let before = records.len();
        records.retain(|r| r.id != id);
        records.len() != before
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        read(&self.records).len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        read(&self.records).is_empty()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn fetch_all(&self) -> Result<Vec<ContentRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| EngagementError::store("content store lock poisoned"))?;
        Ok(records.clone())
    }

    async fn fetch_by_author(&self, author_id: &str) -> Result<Vec<ContentRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| EngagementError::store("content store lock poisoned"))?;
        Ok(records
            .iter()
            .filter(|r| r.is_authored_by(author_id))
            .cloned()
            .collect())
    }
}

/// In-memory profile store.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfileRecord>>,
}

impl MemoryProfileStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a profile, merging with any existing record for the same user.
    ///
    /// Flags already set on the stored profile survive even if `profile`
    /// has them unset.
    pub fn upsert(&self, profile: UserProfileRecord) {
        let mut profiles = write(&self.profiles);
        match profiles.get_mut(&profile.user_id) {
            Some(existing) => existing.merge(&profile),
            None => {
                profiles.insert(profile.user_id.clone(), profile);
            }
        }
    }

    /// Number of profiles in the store.
    pub fn len(&self) -> usize {
        read(&self.profiles).len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        read(&self.profiles).is_empty()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfileRecord>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| EngagementError::store("profile store lock poisoned"))?;
        Ok(profiles.get(user_id).cloned())
    }

    async fn mark_flag(&self, user_id: &str, flag: HistoricalFlag) -> Result<bool> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| EngagementError::store("profile store lock poisoned"))?;
        let profile = profiles
            .entry(user_id.to_string())
            .or_insert_with(|| UserProfileRecord::new(user_id));
        Ok(profile.mark(flag))
    }
}

// Lock helpers for the inherent methods, which have no error channel.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::tests::test_profile_store_monotonic;

    #[tokio::test]
    async fn test_memory_profile_store_monotonic() {
        let store = MemoryProfileStore::new();
        test_profile_store_monotonic(&store).await;
    }

    #[tokio::test]
    async fn test_fetch_all_preserves_order() {
        let store = MemoryContentStore::new();
        store.insert(ContentRecord::new("m2", "A"));
        store.insert(ContentRecord::new("m1", "B"));

        let ids: Vec<String> = store
            .fetch_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["m2", "m1"]);
    }

    #[tokio::test]
    async fn test_insert_replaces_same_id() {
        let store = MemoryContentStore::new();
        store.insert(ContentRecord::new("m1", "A"));
        store.insert(ContentRecord::new("m1", "A").with_like("B"));

        assert_eq!(store.len(), 1);
        let records = store.fetch_all().await.unwrap();
        assert_eq!(records[0].likes.len(), 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemoryContentStore::with_records(vec![
            ContentRecord::new("m1", "A"),
            ContentRecord::new("m2", "A"),
        ]);

        assert!(store.remove("m1"));
        assert!(!store.remove("m1"));
        assert_eq!(store.fetch_by_author("A").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_never_clears_flags() {
        let store = MemoryProfileStore::new();
        store.upsert(UserProfileRecord::new("A").with_flag(HistoricalFlag::Uploaded));
        store.upsert(UserProfileRecord::new("A"));

        assert_eq!(store.len(), 1);
        let profile = store.fetch_profile("A").await.unwrap().unwrap();
        assert!(profile.has(HistoricalFlag::Uploaded));
    }

    #[test]
    fn test_new_stores_are_empty() {
        assert!(MemoryContentStore::new().is_empty());
        assert!(MemoryProfileStore::default().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_marks_transition_once() {
        use std::sync::Arc;

        let store = Arc::new(MemoryProfileStore::new());
        let mut handles = Vec::new();
        for _ in 0..10 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.mark_flag("A", HistoricalFlag::Commented).await.unwrap()
            }));
        }

        let mut transitions = 0;
        for handle in handles {
            if handle.await.unwrap() {
                transitions += 1;
            }
        }
        assert_eq!(transitions, 1);
    }
}

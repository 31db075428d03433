//! The activity engine: public entry point for all engagement queries.
//!
//! No method returns an error. Failures are logged and replaced with a safe
//! default chosen per operation:
//!
//! | operation                      | on read failure             |
//! |--------------------------------|-----------------------------|
//! | single counters                | `0`                         |
//! | `get_user_active_stats`        | failed fields are `0`       |
//! | `get_batch_user_active_stats`  | empty map                   |
//! | `has_ever_*` predicates        | `false`                     |
//!
//! A missing key in a batch result means "no data", never "zero".

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::{
    Achievement, ActivityStats, HistoricalFlag, LeaderboardEntry, LeaderboardMetric, UserId,
};
use crate::error::{FailOpen, Result};
use crate::stats::{batch, counters, history, leaderboard};
use crate::storage::{ContentStore, ProfileStore};

/// Derives engagement statistics and achievements from the content pool.
///
/// Stateless: each call reads its own snapshot from the stores.
#[derive(Clone)]
pub struct ActivityEngine {
    content: Arc<dyn ContentStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl std::fmt::Debug for ActivityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityEngine").finish_non_exhaustive()
    }
}

impl ActivityEngine {
    /// Create an engine over the given stores.
    pub fn new(content: Arc<dyn ContentStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { content, profiles }
    }

    // -------------------------------------------------------------------------
    // Fallible counters
    // -------------------------------------------------------------------------

    async fn try_active_count(&self, user_id: &str) -> Result<u64> {
        let records = self.content.fetch_by_author(user_id).await?;
        Ok(counters::count_authored(&records, user_id))
    }

    async fn try_active_comment_count(&self, user_id: &str) -> Result<u64> {
        let records = self.content.fetch_all().await?;
        tracing::debug!(user_id, records = records.len(), "scanned for comments");
        Ok(counters::count_comments_by(&records, user_id))
    }

    async fn try_total_likes_received(&self, user_id: &str) -> Result<u64> {
        let records = self.content.fetch_by_author(user_id).await?;
        Ok(counters::sum_likes_received(&records, user_id))
    }

    async fn try_total_comments_received(&self, user_id: &str) -> Result<u64> {
        let records = self.content.fetch_by_author(user_id).await?;
        Ok(counters::sum_comments_received(&records, user_id))
    }

    // -------------------------------------------------------------------------
    // Per-user counters
    // -------------------------------------------------------------------------

    /// Number of existing memes authored by `user_id`.
    pub async fn get_active_count(&self, user_id: &str) -> u64 {
        self.try_active_count(user_id)
            .await
            .fail_open_default(&format!("counting active memes for {}", user_id))
    }

    /// Number of existing comments written by `user_id` on any meme.
    pub async fn get_active_comment_count(&self, user_id: &str) -> u64 {
        self.try_active_comment_count(user_id)
            .await
            .fail_open_default(&format!("counting active comments for {}", user_id))
    }

    /// Likes on the existing memes of `user_id`.
    pub async fn get_total_likes_received(&self, user_id: &str) -> u64 {
        self.try_total_likes_received(user_id)
            .await
            .fail_open_default(&format!("counting likes received by {}", user_id))
    }

    /// Comments on the existing memes of `user_id`.
    pub async fn get_total_comments_received(&self, user_id: &str) -> u64 {
        self.try_total_comments_received(user_id)
            .await
            .fail_open_default(&format!("counting comments received by {}", user_id))
    }

    /// All four metrics for one user.
    ///
    /// The four counters run concurrently and each degrades to `0` on its
    /// own without affecting the others.
    pub async fn get_user_active_stats(&self, user_id: &str) -> ActivityStats {
        let (memes, comments, likes, comments_received) = tokio::join!(
            self.get_active_count(user_id),
            self.get_active_comment_count(user_id),
            self.get_total_likes_received(user_id),
            self.get_total_comments_received(user_id),
        );

        ActivityStats {
            active_content_count: memes,
            active_comment_count: comments,
            total_likes_received: likes,
            total_comments_received: comments_received,
        }
    }

    // -------------------------------------------------------------------------
    // Batch
    // -------------------------------------------------------------------------

    async fn try_batch_user_active_stats(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, ActivityStats>> {
        let requested = batch::distinct_ids(user_ids);
        let records = self.content.fetch_all().await?;
        tracing::debug!(
            users = requested.len(),
            records = records.len(),
            "aggregating batch stats"
        );
        Ok(batch::aggregate(&records, &requested))
    }

    /// Stats for many users computed with a single scan.
    ///
    /// Every distinct requested id gets an entry, zero-valued when the user
    /// has no activity. Bounding the request size is up to the caller. If the scan fails the map is **empty**:
    /// treat a missing key as "no data", not as zero. This differs from
    /// [`get_user_active_stats`](Self::get_user_active_stats), which returns
    /// zeroed stats on failure.
    pub async fn get_batch_user_active_stats(
        &self,
        user_ids: &[UserId],
    ) -> HashMap<UserId, ActivityStats> {
        self.try_batch_user_active_stats(user_ids)
            .await
            .fail_open_default("getting batch user active stats")
    }

    /// Rank `user_ids` by `metric` using the batch path.
    ///
    /// Empty when the batch scan failed.
    pub async fn leaderboard(
        &self,
        user_ids: &[UserId],
        metric: LeaderboardMetric,
        limit: usize,
    ) -> Vec<LeaderboardEntry> {
        let stats = self.get_batch_user_active_stats(user_ids).await;
        leaderboard::rank(&stats, metric, limit)
    }

    // -------------------------------------------------------------------------
    // Historical fallback predicates
    // -------------------------------------------------------------------------

    async fn resolve(
        &self,
        user_id: &str,
        current: Result<u64>,
        flag: HistoricalFlag,
        context: &str,
    ) -> bool {
        history::resolve(current, self.profiles.as_ref(), user_id, flag)
            .await
            .fail_open_with(&format!("{} for {}", context, user_id), false)
    }

    /// Whether `user_id` has ever uploaded a meme, even one since deleted.
    pub async fn has_ever_uploaded_meme(&self, user_id: &str) -> bool {
        let current = self.try_active_count(user_id).await;
        self.resolve(
            user_id,
            current,
            HistoricalFlag::Uploaded,
            "checking if user has ever uploaded",
        )
        .await
    }

    /// Whether any meme by `user_id` has ever received a like.
    pub async fn has_ever_received_like(&self, user_id: &str) -> bool {
        let current = self.try_total_likes_received(user_id).await;
        self.resolve(
            user_id,
            current,
            HistoricalFlag::ReceivedLike,
            "checking if user has ever received like",
        )
        .await
    }

    /// Whether `user_id` has ever written a comment.
    pub async fn has_ever_made_comment(&self, user_id: &str) -> bool {
        let current = self.try_active_comment_count(user_id).await;
        self.resolve(
            user_id,
            current,
            HistoricalFlag::Commented,
            "checking if user has ever commented",
        )
        .await
    }

    /// The "has ever" predicate backing `flag`.
    pub async fn has_ever(&self, user_id: &str, flag: HistoricalFlag) -> bool {
        match flag {
            HistoricalFlag::Uploaded => self.has_ever_uploaded_meme(user_id).await,
            HistoricalFlag::ReceivedLike => self.has_ever_received_like(user_id).await,
            HistoricalFlag::Commented => self.has_ever_made_comment(user_id).await,
        }
    }

    /// Whether `achievement` is unlocked for `user_id`.
    pub async fn is_unlocked(&self, user_id: &str, achievement: Achievement) -> bool {
        self.has_ever(user_id, achievement.flag()).await
    }

    /// All unlocked achievements for `user_id`, in [`Achievement::ALL`] order.
    pub async fn evaluate_achievements(&self, user_id: &str) -> Vec<Achievement> {
        let [first, second, third] = Achievement::ALL;
        let (a, b, c) = tokio::join!(
            self.is_unlocked(user_id, first),
            self.is_unlocked(user_id, second),
            self.is_unlocked(user_id, third),
        );

        [(first, a), (second, b), (third, c)]
            .into_iter()
            .filter_map(|(achievement, unlocked)| unlocked.then_some(achievement))
            .collect()
    }
}

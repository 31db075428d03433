//! Batch aggregation.
//!
//! Computes stats for many users with one pass over the snapshot. Calling
//! the per-user counters N times costs O(N × records); this costs
//! O(records + comment entries) regardless of N.

use std::collections::{HashMap, HashSet};

use crate::core::{ActivityStats, ContentRecord, UserId};

/// Normalize a batch request: drop duplicates and keep first-seen order.
pub fn distinct_ids<S: AsRef<str>>(user_ids: &[S]) -> Vec<UserId> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for id in user_ids {
        let id: &str = id.as_ref();
        if seen.insert(id) {
            ids.push(id.to_string());
        }
    }
    ids
}

/// Aggregate stats for `user_ids` over `records` in a single scan.
///
/// Every requested id gets an entry, zero-valued when the user has no
/// activity. A user's comments on their own memes count both as comments
/// made and as comments received.
pub fn aggregate(records: &[ContentRecord], user_ids: &[UserId]) -> HashMap<UserId, ActivityStats> {
    let mut stats: HashMap<UserId, ActivityStats> = user_ids
        .iter()
        .map(|id| (id.clone(), ActivityStats::default()))
        .collect();

    for record in records {
        if let Some(author) = stats.get_mut(&record.author_id) {
            author.active_content_count += 1;
            author.total_likes_received += record.likes.len() as u64;
            author.total_comments_received += record.comments.len() as u64;
        }

        for comment in &record.comments {
            if let Some(commenter) = stats.get_mut(&comment.user_id) {
                commenter.active_comment_count += 1;
            }
        }
    }

    stats
}

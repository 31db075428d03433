//! Per-user counters.
//!
//! Each function scans a content slice for one user and one metric. The
//! engine feeds them either the author-filtered records or the full
//! snapshot, but the functions never assume the slice was pre-filtered.

use crate::core::{ActivityStats, ContentRecord};

/// Number of records authored by `user_id`.
pub fn count_authored(records: &[ContentRecord], user_id: &str) -> u64 {
    records.iter().filter(|r| r.is_authored_by(user_id)).count() as u64
}

/// Number of comments written by `user_id`, across all records regardless
/// of author.
pub fn count_comments_by(records: &[ContentRecord], user_id: &str) -> u64 {
    records.iter().map(|r| r.comments_by(user_id) as u64).sum()
}

/// Sum of likes over records authored by `user_id`.
pub fn sum_likes_received(records: &[ContentRecord], user_id: &str) -> u64 {
    records
        .iter()
        .filter(|r| r.is_authored_by(user_id))
        .map(|r| r.likes.len() as u64)
        .sum()
}

/// Sum of comments over records authored by `user_id`.
pub fn sum_comments_received(records: &[ContentRecord], user_id: &str) -> u64 {
    records
        .iter()
        .filter(|r| r.is_authored_by(user_id))
        .map(|r| r.comments.len() as u64)
        .sum()
}

/// All four metrics for one user over a full snapshot.
pub fn stats_for(records: &[ContentRecord], user_id: &str) -> ActivityStats {
    ActivityStats {
        active_content_count: count_authored(records, user_id),
        active_comment_count: count_comments_by(records, user_id),
        total_likes_received: sum_likes_received(records, user_id),
        total_comments_received: sum_comments_received(records, user_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<ContentRecord> {
        vec![ContentRecord::new("m1", "A")
            .with_like("B")
            .with_comment("B")
            .with_comment("A")]
    }

    #[test]
    fn test_scenario_counts() {
        let records = scenario();
        assert_eq!(count_authored(&records, "A"), 1);
        assert_eq!(sum_likes_received(&records, "A"), 1);
        assert_eq!(sum_comments_received(&records, "A"), 2);
        assert_eq!(count_comments_by(&records, "B"), 1);
        assert_eq!(count_comments_by(&records, "A"), 1);
    }

    #[test]
    fn test_unknown_user_is_zero() {
        assert!(stats_for(&scenario(), "C").is_zero());
    }

    #[test]
    fn test_empty_snapshot_is_zero() {
        assert!(stats_for(&[], "A").is_zero());
    }

    #[test]
    fn test_received_counts_ignore_other_authors() {
        let records = vec![
            ContentRecord::new("m1", "A").with_like("B").with_like("C"),
            ContentRecord::new("m2", "B").with_like("A").with_comment("A"),
        ];

        assert_eq!(sum_likes_received(&records, "A"), 2);
        assert_eq!(sum_comments_received(&records, "A"), 0);
        // A's comment on B's meme counts as a comment made by A
        assert_eq!(count_comments_by(&records, "A"), 1);
    }

    #[test]
    fn test_likes_are_not_deduplicated() {
        // Counts mirror the stored sequence, duplicates included
        let records = vec![ContentRecord::new("m1", "A").with_like("B").with_like("B")];
        assert_eq!(sum_likes_received(&records, "A"), 2);
    }

    #[test]
    fn test_stats_for_matches_individual_counters() {
        let records = scenario();
        let stats = stats_for(&records, "A");
        assert_eq!(stats.active_content_count, 1);
        assert_eq!(stats.active_comment_count, 1);
        assert_eq!(stats.total_likes_received, 1);
        assert_eq!(stats.total_comments_received, 2);
    }
}

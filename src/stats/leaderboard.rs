//! Leaderboard ranking over batch results.

use std::collections::HashMap;

use crate::core::{ActivityStats, LeaderboardEntry, LeaderboardMetric, UserId};

/// Rank batch results by `metric`, highest first.
///
/// Ties are broken by user id ascending so the order is stable across
/// calls. At most `limit` entries are returned.
pub fn rank(
    stats: &HashMap<UserId, ActivityStats>,
    metric: LeaderboardMetric,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut rows: Vec<(&UserId, &ActivityStats)> = stats.iter().collect();
    rows.sort_by(|a, b| {
        b.1.metric(metric)
            .cmp(&a.1.metric(metric))
            .then_with(|| a.0.cmp(b.0))
    });

    rows.into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (user_id, stats))| LeaderboardEntry {
            rank: i + 1,
            user_id: user_id.clone(),
            score: stats.metric(metric),
            stats: *stats,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(likes: u64, memes: u64) -> ActivityStats {
        ActivityStats {
            active_content_count: memes,
            total_likes_received: likes,
            ..ActivityStats::default()
        }
    }

    #[test]
    fn test_rank_orders_by_metric() {
        let mut map = HashMap::new();
        map.insert("A".to_string(), stats(5, 1));
        map.insert("B".to_string(), stats(9, 0));
        map.insert("C".to_string(), stats(1, 4));

        let board = rank(&map, LeaderboardMetric::Likes, 10);
        let order: Vec<&str> = board.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].score, 9);

        let board = rank(&map, LeaderboardMetric::Memes, 10);
        assert_eq!(board[0].user_id, "C");
    }

    #[test]
    fn test_ties_break_by_user_id() {
        let mut map = HashMap::new();
        map.insert("Z".to_string(), stats(2, 0));
        map.insert("M".to_string(), stats(2, 0));
        map.insert("A".to_string(), stats(2, 0));

        let board = rank(&map, LeaderboardMetric::Likes, 10);
        let order: Vec<&str> = board.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(order, vec!["A", "M", "Z"]);
    }

    #[test]
    fn test_limit() {
        let mut map = HashMap::new();
        for (i, id) in ["A", "B", "C", "D"].iter().enumerate() {
            map.insert(id.to_string(), stats(i as u64, 0));
        }

        let board = rank(&map, LeaderboardMetric::Likes, 2);
        assert_eq!(board.len(), 2);
        assert_eq!(board[1].rank, 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(&HashMap::new(), LeaderboardMetric::Likes, 10).is_empty());
    }
}

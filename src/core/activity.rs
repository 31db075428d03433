//! Derived activity types.
//!
//! Nothing here is persisted. Every value is computed fresh from the current
//! content snapshot on each request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{HistoricalFlag, UserId};
use crate::error::EngagementError;

/// Engagement statistics for one user over the currently visible content.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStats {
    /// Memes the user authored that still exist.
    pub active_content_count: u64,
    /// Comments the user wrote, on anyone's memes, that still exist.
    pub active_comment_count: u64,
    /// Likes on the user's existing memes.
    pub total_likes_received: u64,
    /// Comments on the user's existing memes.
    pub total_comments_received: u64,
}

impl ActivityStats {
    /// Read one metric.
    pub fn metric(&self, metric: LeaderboardMetric) -> u64 {
        match metric {
            LeaderboardMetric::Memes => self.active_content_count,
            LeaderboardMetric::Comments => self.active_comment_count,
            LeaderboardMetric::Likes => self.total_likes_received,
            LeaderboardMetric::CommentsReceived => self.total_comments_received,
        }
    }

    /// Whether every field is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Metric a leaderboard is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaderboardMetric {
    Memes,
    Comments,
    Likes,
    CommentsReceived,
}

impl LeaderboardMetric {
    /// Stable name used in config and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardMetric::Memes => "memes",
            LeaderboardMetric::Comments => "comments",
            LeaderboardMetric::Likes => "likes",
            LeaderboardMetric::CommentsReceived => "comments-received",
        }
    }
}

impl fmt::Display for LeaderboardMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardMetric {
    type Err = EngagementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memes" => Ok(LeaderboardMetric::Memes),
            "comments" => Ok(LeaderboardMetric::Comments),
            "likes" => Ok(LeaderboardMetric::Likes),
            "comments-received" => Ok(LeaderboardMetric::CommentsReceived),
            other => Err(EngagementError::invalid_input(format!(
                "unknown leaderboard metric: {}",
                other
            ))),
        }
    }
}

/// One ranked row of a leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: usize,
    pub user_id: UserId,
    /// Value of the ranking metric.
    pub score: u64,
    pub stats: ActivityStats,
}

/// Achievements backed by the historical fallback predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    FirstMeme,
    FirstLike,
    FirstComment,
}

impl Achievement {
    /// All achievements in display order.
    pub const ALL: [Achievement; 3] = [
        Achievement::FirstMeme,
        Achievement::FirstLike,
        Achievement::FirstComment,
    ];

    /// Stable identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Achievement::FirstMeme => "first_meme",
            Achievement::FirstLike => "first_like",
            Achievement::FirstComment => "first_comment",
        }
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstMeme => "First Meme",
            Achievement::FirstLike => "First Like",
            Achievement::FirstComment => "First Comment",
        }
    }

    /// Profile flag that keeps this achievement after content is deleted.
    pub fn flag(&self) -> HistoricalFlag {
        match self {
            Achievement::FirstMeme => HistoricalFlag::Uploaded,
            Achievement::FirstLike => HistoricalFlag::ReceivedLike,
            Achievement::FirstComment => HistoricalFlag::Commented,
        }
    }
}

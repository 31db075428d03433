//! Engagement - user activity aggregation for a meme feed.
//!
//! Derives per-user engagement statistics and "has ever" achievement flags
//! from a shared pool of content records, one user at a time or for a whole
//! leaderboard in a single scan. The document store itself is external and
//! reached through the [`storage`] traits.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod stats;
pub mod storage;

pub use config::Config;
pub use crate::core::{
    Achievement, ActivityStats, Comment, ContentRecord, HistoricalFlag, LeaderboardEntry,
    LeaderboardMetric, Like, UserId, UserProfileRecord,
};
pub use error::{EngagementError, FailOpen, Result};
pub use stats::ActivityEngine;
pub use storage::{ContentStore, FileStore, MemoryContentStore, MemoryProfileStore, ProfileStore};

// CLI commands
pub use cli::{AchievementsCommand, LeaderboardCommand, StatsCommand};

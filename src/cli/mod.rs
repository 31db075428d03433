//! CLI commands for the engagement engine.
//!
//! Each command wraps the [`ActivityEngine`](crate::stats::ActivityEngine)
//! and renders its result as JSON or human-readable text:
//! - **stats**: one user's activity (single-user path)
//! - **leaderboard**: many users ranked by a metric (batch path)
//! - **achievements**: unlocked achievements (historical fallback)

pub mod achievements;
pub mod leaderboard;
pub mod stats;

pub use achievements::{AchievementsCommand, AchievementsOptions, AchievementsOutput};
pub use leaderboard::{LeaderboardCommand, LeaderboardOptions, LeaderboardOutput};
pub use stats::{StatsCommand, StatsOptions, StatsOutput};

//! User activity aggregation.
//!
//! Per-user counters and the single-scan batch aggregator share the same
//! counting rules, so both paths always reconcile. The history resolver
//! adds the profile fallback for achievement predicates, and the engine
//! ties them to the stores with fail-open defaults.

pub mod batch;
pub mod counters;
pub mod engine;
pub mod history;
pub mod leaderboard;

pub use batch::{aggregate, distinct_ids};
pub use counters::{
    count_authored, count_comments_by, stats_for, sum_comments_received, sum_likes_received,
};
pub use engine::ActivityEngine;
pub use leaderboard::rank;

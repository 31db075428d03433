//! Core types for the engagement engine.
//!
//! Content and profile records as the document store shapes them, plus the
//! derived statistics and achievement types the engine produces.

pub mod activity;
pub mod content;
pub mod profile;

pub use activity::{Achievement, ActivityStats, LeaderboardEntry, LeaderboardMetric};
pub use content::{Comment, ContentRecord, Like, UserId};
pub use profile::{HistoricalFlag, UserProfileRecord};

//! Leaderboard command.
//!
//! Ranks a set of users with the batch aggregator. Requests larger than the
//! configured `batch.max_users` are refused before any scan.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::{LeaderboardEntry, LeaderboardMetric, UserId};
use crate::error::Result;
use crate::stats::{distinct_ids, ActivityEngine};

/// Options for the leaderboard command.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Ranking metric name; falls back to the configured default.
    pub metric: Option<String>,
    /// Maximum rows; falls back to the configured default.
    pub limit: Option<usize>,
}

/// Output format for the leaderboard command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardOutput {
    /// Whether stats were available.
    pub success: bool,
    pub metric: String,
    pub entries: Vec<LeaderboardEntry>,
    /// Error message if the leaderboard could not be computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LeaderboardOutput {
    /// Create a successful output.
    pub fn success(metric: LeaderboardMetric, entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            success: true,
            metric: metric.to_string(),
            entries,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(metric: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            metric: metric.into(),
            entries: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The leaderboard command implementation.
pub struct LeaderboardCommand {
    engine: ActivityEngine,
    config: Config,
}

impl LeaderboardCommand {
    /// Create a new leaderboard command.
    pub fn new(engine: ActivityEngine, config: Config) -> Self {
        Self { engine, config }
    }

    fn resolve_metric(&self, options: &LeaderboardOptions) -> Result<LeaderboardMetric> {
        options
            .metric
            .as_deref()
            .unwrap_or(self.config.leaderboard.default_metric.as_str())
            .parse()
    }

    /// Run the leaderboard command.
    pub async fn run(&self, user_ids: &[UserId], options: &LeaderboardOptions) -> LeaderboardOutput {
        let metric = match self.resolve_metric(options) {
            Ok(m) => m,
            Err(e) => {
                let name = options.metric.clone().unwrap_or_default();
                return LeaderboardOutput::failure(name, e.to_string());
            }
        };
        let limit = options
            .limit
            .unwrap_or(self.config.leaderboard.default_limit);

        let user_ids = distinct_ids(user_ids);
        if user_ids.is_empty() {
            return LeaderboardOutput::success(metric, Vec::new());
        }

        let max_users = self.config.batch.max_users;
        if user_ids.len() > max_users {
            tracing::warn!(
                requested = user_ids.len(),
                max = max_users,
                "leaderboard request exceeds batch cap"
            );
            return LeaderboardOutput::failure(
                metric.as_str(),
                format!(
                    "too many users: {} requested, at most {} allowed",
                    user_ids.len(),
                    max_users
                ),
            );
        }

        let entries = self.engine.leaderboard(&user_ids, metric, limit).await;

        // The batch path zero-fills every requested user, so an empty board
        // for a non-empty request means the scan failed.
        if entries.is_empty() && limit > 0 {
            return LeaderboardOutput::failure(metric.as_str(), "stats unavailable");
        }

        LeaderboardOutput::success(metric, entries)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &LeaderboardOutput, options: &LeaderboardOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            Self::format_human_readable(output)
        }
    }

    fn format_human_readable(output: &LeaderboardOutput) -> String {
        if !output.success {
            return format!(
                "Leaderboard failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        let mut lines = vec![format!("=== Leaderboard by {} ===\n", output.metric)];
        if output.entries.is_empty() {
            lines.push("   No users.".to_string());
        }
        for entry in &output.entries {
            lines.push(format!(
                "   {:>3}. {:<24} {}",
                entry.rank, entry.user_id, entry.score
            ));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ContentRecord;
    use crate::storage::traits::tests::ScriptedStore;
    use crate::storage::{MemoryContentStore, MemoryProfileStore};
    use std::sync::Arc;

    fn users(list: &[&str]) -> Vec<UserId> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn command(config: Config) -> LeaderboardCommand {
        let content = MemoryContentStore::with_records(vec![
            ContentRecord::new("m1", "A").with_like("B").with_comment("C"),
            ContentRecord::new("m2", "B").with_like("A").with_like("C"),
            ContentRecord::new("m3", "B"),
        ]);
        let engine = ActivityEngine::new(Arc::new(content), Arc::new(MemoryProfileStore::new()));
        LeaderboardCommand::new(engine, config)
    }

    #[tokio::test]
    async fn test_default_metric_is_likes() {
        let cmd = command(Config::default());
        let output = cmd
            .run(&users(&["A", "B", "C"]), &LeaderboardOptions::default())
            .await;

        assert!(output.success);
        assert_eq!(output.metric, "likes");
        assert_eq!(output.entries[0].user_id, "B");
        assert_eq!(output.entries[0].score, 2);
        assert_eq!(output.entries.len(), 3);
    }

    #[tokio::test]
    async fn test_metric_and_limit_options() {
        let cmd = command(Config::default());
        let options = LeaderboardOptions {
            metric: Some("memes".to_string()),
            limit: Some(1),
            ..Default::default()
        };

        let output = cmd.run(&users(&["A", "B", "C"]), &options).await;
        assert_eq!(output.entries.len(), 1);
        assert_eq!(output.entries[0].user_id, "B");
        assert_eq!(output.entries[0].score, 2);
    }

    #[tokio::test]
    async fn test_configured_defaults() {
        let mut config = Config::default();
        config.leaderboard.default_metric = "comments".to_string();
        config.leaderboard.default_limit = 1;

        let output = command(config)
            .run(&users(&["A", "C"]), &LeaderboardOptions::default())
            .await;
        assert_eq!(output.metric, "comments");
        assert_eq!(output.entries.len(), 1);
        assert_eq!(output.entries[0].user_id, "C");
    }

    #[tokio::test]
    async fn test_unknown_metric_fails() {
        let cmd = command(Config::default());
        let options = LeaderboardOptions {
            metric: Some("karma".to_string()),
            ..Default::default()
        };

        let output = cmd.run(&users(&["A"]), &options).await;
        assert!(!output.success);
        assert!(output.error.unwrap().contains("karma"));
    }

    #[tokio::test]
    async fn test_over_cap_request_is_refused_without_scan() {
        let store = Arc::new(ScriptedStore::default());
        let engine = ActivityEngine::new(store.clone(), store.clone());
        let mut config = Config::default();
        config.batch.max_users = 2;
        let cmd = LeaderboardCommand::new(engine, config);

        let output = cmd
            .run(&users(&["A", "B", "C"]), &LeaderboardOptions::default())
            .await;
        assert!(!output.success);
        assert!(output.entries.is_empty());
        assert!(output.error.unwrap().contains("at most 2"));
        assert_eq!(store.scans(), 0);
    }

    #[tokio::test]
    async fn test_duplicates_do_not_count_against_cap() {
        let mut config = Config::default();
        config.batch.max_users = 2;

        let output = command(config)
            .run(&users(&["A", "B", "A", "B"]), &LeaderboardOptions::default())
            .await;
        assert!(output.success);
        assert_eq!(output.entries.len(), 2);
    }

    #[tokio::test]
    async fn test_scan_failure_reports_unavailable() {
        let store = Arc::new(ScriptedStore::failing());
        let engine = ActivityEngine::new(store.clone(), store);
        let cmd = LeaderboardCommand::new(engine, Config::default());

        let output = cmd.run(&users(&["A"]), &LeaderboardOptions::default()).await;
        assert!(!output.success);
        assert_eq!(output.error.as_deref(), Some("stats unavailable"));
    }

    #[tokio::test]
    async fn test_format_output() {
        let cmd = command(Config::default());
        let output = cmd
            .run(&users(&["A", "B"]), &LeaderboardOptions::default())
            .await;

        let text = cmd.format_output(&output, &LeaderboardOptions::default());
        assert!(text.contains("Leaderboard by likes"));
        assert!(text.contains("1. B"));

        let json = cmd.format_output(
            &output,
            &LeaderboardOptions {
                json: true,
                ..Default::default()
            },
        );
        assert!(json.contains("\"success\": true"));
        assert!(json.contains("\"userId\": \"B\""));
    }
}

//! Stats command.
//!
//! Displays one user's engagement statistics.

use serde::{Deserialize, Serialize};

use crate::core::ActivityStats;
use crate::stats::ActivityEngine;

/// Options for the stats command.
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the stats command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOutput {
    pub user_id: String,
    pub stats: ActivityStats,
}

/// The stats command implementation.
pub struct StatsCommand {
    engine: ActivityEngine,
}

impl StatsCommand {
    /// Create a new stats command.
    pub fn new(engine: ActivityEngine) -> Self {
        Self { engine }
    }

    /// Run the stats command.
    pub async fn run(&self, user_id: &str) -> StatsOutput {
        StatsOutput {
            user_id: user_id.to_string(),
            stats: self.engine.get_user_active_stats(user_id).await,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StatsOutput, options: &StatsOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            Self::format_human_readable(output)
        }
    }

    fn format_human_readable(output: &StatsOutput) -> String {
        let stats = &output.stats;
        let lines = [
            format!("=== Activity for {} ===\n", output.user_id),
            format!("   Memes posted:       {}", stats.active_content_count),
            format!("   Comments written:   {}", stats.active_comment_count),
            format!("   Likes received:     {}", stats.total_likes_received),
            format!("   Comments received:  {}", stats.total_comments_received),
        ];
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

//! Achievements command.
//!
//! Lists which "first X" achievements a user has unlocked, including ones
//! earned by content that has since been deleted.

use serde::{Deserialize, Serialize};

use crate::core::Achievement;
use crate::stats::ActivityEngine;

/// Options for the achievements command.
#[derive(Debug, Clone, Default)]
pub struct AchievementsOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// One achievement row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AchievementInfo {
    pub id: String,
    pub title: String,
    pub unlocked: bool,
}

/// Output format for the achievements command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementsOutput {
    pub user_id: String,
    pub achievements: Vec<AchievementInfo>,
}

impl AchievementsOutput {
    /// Number of unlocked achievements.
    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }
}

/// The achievements command implementation.
pub struct AchievementsCommand {
    engine: ActivityEngine,
}

impl AchievementsCommand {
    /// Create a new achievements command.
    pub fn new(engine: ActivityEngine) -> Self {
        Self { engine }
    }

    /// Run the achievements command.
    pub async fn run(&self, user_id: &str) -> AchievementsOutput {
        let unlocked = self.engine.evaluate_achievements(user_id).await;
        let achievements = Achievement::ALL
            .iter()
            .map(|a| AchievementInfo {
                id: a.id().to_string(),
                title: a.title().to_string(),
                unlocked: unlocked.contains(a),
            })
            .collect();

        AchievementsOutput {
            user_id: user_id.to_string(),
            achievements,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &AchievementsOutput, options: &AchievementsOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        let mut lines = vec![format!(
            "=== Achievements for {} ({}/{}) ===\n",
            output.user_id,
            output.unlocked_count(),
            output.achievements.len()
        )];
        for a in &output.achievements {
            let mark = if a.unlocked { "[x]" } else { "[ ]" };
            lines.push(format!("   {} {}", mark, a.title));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ContentRecord, HistoricalFlag, UserProfileRecord};
    use crate::storage::{MemoryContentStore, MemoryProfileStore};
    use std::sync::Arc;

    fn command() -> AchievementsCommand {
        let content =
            MemoryContentStore::with_records(vec![ContentRecord::new("m1", "A").with_comment("B")]);
        let profiles = MemoryProfileStore::new();
        profiles.upsert(UserProfileRecord::new("C").with_flag(HistoricalFlag::ReceivedLike));
        AchievementsCommand::new(ActivityEngine::new(Arc::new(content), Arc::new(profiles)))
    }

    #[tokio::test]
    async fn test_run_lists_all_achievements() {
        let output = command().run("A").await;
        assert_eq!(output.achievements.len(), 3);
        assert_eq!(output.unlocked_count(), 1);
        assert!(output.achievements[0].unlocked);
        assert_eq!(output.achievements[0].id, "first_meme");
    }

    #[tokio::test]
    async fn test_historical_flag_unlocks() {
        let output = command().run("C").await;
        let like = output
            .achievements
            .iter()
            .find(|a| a.id == "first_like")
            .unwrap();
        assert!(like.unlocked);
        assert_eq!(output.unlocked_count(), 1);
    }

    #[tokio::test]
    async fn test_format_output() {
        let cmd = command();
        let output = cmd.run("B").await;

        let text = cmd.format_output(&output, &AchievementsOptions::default());
        assert!(text.contains("Achievements for B (1/3)"));
        assert!(text.contains("[x] First Comment"));
        assert!(text.contains("[ ] First Meme"));

        let json = cmd.format_output(
            &output,
            &AchievementsOptions {
                json: true,
                ..Default::default()
            },
        );
        assert!(json.contains("\"userId\": \"B\""));
        assert!(cmd
            .format_output(
                &output,
                &AchievementsOptions {
                    quiet: true,
                    ..Default::default()
                }
            )
            .is_empty());
    }
}

//! Engagement - user activity aggregation for a meme feed
//!
//! CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use engagement::cli::{
    AchievementsCommand, AchievementsOptions, LeaderboardCommand, LeaderboardOptions,
    StatsCommand, StatsOptions,
};
use engagement::config::Config;
use engagement::error::exit_codes;
use engagement::stats::ActivityEngine;
use engagement::storage::FileStore;

// =============================================================================
// CLI Definition
// =============================================================================

/// Engagement statistics and achievements over a meme snapshot
#[derive(Parser)]
#[command(name = "engagement")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing memes.json and profiles/ (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one user's activity stats
    Stats {
        /// The user to inspect
        user_id: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Rank users by a metric using a single scan
    Leaderboard {
        /// Users to rank
        #[arg(required = true)]
        user_ids: Vec<String>,
        /// Ranking metric: memes, comments, likes, comments-received
        #[arg(long, short)]
        metric: Option<String>,
        /// Maximum number of rows
        #[arg(long, short)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show which achievements a user has unlocked
    Achievements {
        /// The user to inspect
        user_id: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("engagement error: {}", e);
            ExitCode::from(exit_codes::FAILURE)
        }
    }
}

/// Install the stderr log subscriber so stdout stays clean for JSON.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("engagement={}", default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run the CLI and return the exit code.
async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = Config::load();
    if let Some(dir) = cli.data_dir {
        config.store.data_dir = Some(dir);
    }

    let store = Arc::new(FileStore::from_config(&config)?);
    tracing::debug!(data_dir = %store.data_dir().display(), "using file store");
    let engine = ActivityEngine::new(store.clone(), store);

    match cli.command {
        Commands::Stats {
            user_id,
            json,
            quiet,
        } => {
            let cmd = StatsCommand::new(engine);
            let output = cmd.run(&user_id).await;
            print!("{}", cmd.format_output(&output, &StatsOptions { json, quiet }));
            Ok(ExitCode::from(exit_codes::SUCCESS))
        }
        Commands::Leaderboard {
            user_ids,
            metric,
            limit,
            json,
            quiet,
        } => {
            let options = LeaderboardOptions {
                json,
                quiet,
                metric,
                limit,
            };
            let cmd = LeaderboardCommand::new(engine, config);
            let output = cmd.run(&user_ids, &options).await;
            print!("{}", cmd.format_output(&output, &options));
            let code = if output.success {
                exit_codes::SUCCESS
            } else {
                exit_codes::FAILURE
            };
            Ok(ExitCode::from(code))
        }
        Commands::Achievements {
            user_id,
            json,
            quiet,
        } => {
            let cmd = AchievementsCommand::new(engine);
            let output = cmd.run(&user_id).await;
            print!(
                "{}",
                cmd.format_output(&output, &AchievementsOptions { json, quiet })
            );
            Ok(ExitCode::from(exit_codes::SUCCESS))
        }
    }
}

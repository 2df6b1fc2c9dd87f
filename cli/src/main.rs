//! CLI for issue-transfer.
//!
//! Transfers every open issue from a source repository to a target
//! repository and restores labels and milestones there.

use clap::Parser;
use issue_transfer::{
    FailurePolicy, MigrationConfig, RetryPolicy, RunSummary, Runner, RunnerConfig, RunnerError,
};
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Transfer - Move open issues between GitHub repositories, keeping labels and milestones.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Source repository (owner/name).
    #[arg(long, env = "SOURCE_REPO")]
    source: Option<String>,

    /// Target repository (owner/name).
    #[arg(long, env = "TARGET_REPO")]
    target: Option<String>,

    /// Preview changes without transferring issues.
    #[arg(long)]
    dry_run: bool,

    /// Maximum number of issues transferred at once.
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Continue with the next issue when one fails.
    #[arg(long)]
    keep_going: bool,

    /// Retries for the final issue update call.
    #[arg(long, default_value_t = 3)]
    update_retries: u32,

    /// Seconds to wait between update retries.
    #[arg(long, default_value_t = 2)]
    retry_delay_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before clap reads the environment
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    init_tracing();

    if let Err(e) = dotenv {
        if !e.not_found() {
            error!(error = %e, "Failed to load .env file");
            return ExitCode::from(2);
        }
    }

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.all_success() {
                ExitCode::from(0)
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let migration = MigrationConfig::from_values(
        args.token.as_deref(),
        args.source.as_deref(),
        args.target.as_deref(),
    )?;

    let failure_policy = if args.keep_going {
        FailurePolicy::Continue
    } else {
        FailurePolicy::FailFast
    };
    let config = RunnerConfig::new(args.dry_run, args.concurrency)
        .with_failure_policy(failure_policy)
        .with_update_retry(RetryPolicy::new(
            args.update_retries,
            Duration::from_secs(args.retry_delay_secs),
        ));

    let runner = Runner::new(migration, config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Open issues found: {}", summary.issues_found);

    if summary.dry_run {
        println!("  Issues planned: {}", summary.issues_planned);
        println!("  Labels to create: {}", summary.labels_created);
        println!("  Milestones to create: {}", summary.milestones_created);
        return;
    }

    println!("  Issues transferred: {}", summary.issues_transferred);
    println!("  Issues updated: {}", summary.issues_updated);
    println!("  Issues failed: {}", summary.issues_failed);
    println!("  Labels created: {}", summary.labels_created);
    println!("  Milestones created: {}", summary.milestones_created);
    if summary.aborted {
        println!(
            "  Stopped early: {} issues not attempted",
            summary.issues_not_attempted()
        );
    }
}

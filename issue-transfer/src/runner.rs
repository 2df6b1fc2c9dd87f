//! Orchestrates issue transfer runs.

mod config;
mod error;

pub use config::{FailurePolicy, RunnerConfig};
pub use error::RunnerError;

use crate::config::MigrationConfig;
use crate::host::{GitHubHost, IssueHost};
use crate::reconcile::{MilestonePlan, Reconciler};
use crate::summary::{ProcessingResult, RunSummary};
use crate::transfer::{IssuePlan, IssueTransfer};
use crate::types::Issue;
use futures::future;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

/// Orchestrates a full transfer from the source to the target repository.
pub struct Runner<H = GitHubHost> {
    migration: MigrationConfig,
    config: RunnerConfig,
    host: H,
}

impl Runner<GitHubHost> {
    /// Builds a runner that talks to GitHub with the configured token.
    pub fn new(migration: MigrationConfig, config: RunnerConfig) -> Result<Self, RunnerError> {
        let host = GitHubHost::new(migration.token())?;
        Ok(Self::with_host(migration, config, host))
    }
}

impl<H: IssueHost> Runner<H> {
    /// Builds a runner on top of an existing host.
    pub fn with_host(migration: MigrationConfig, config: RunnerConfig, host: H) -> Self {
        Self {
            migration,
            config,
            host,
        }
    }

    /// Returns the host this runner talks to.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Executes the full transfer flow.
    ///
    /// Reads the source issues and the target snapshot, then processes every
    /// issue. Per-issue failures are recorded in the summary; whether they
    /// stop the batch depends on the [`FailurePolicy`]. Under fail-fast no new
    /// issue is started after a failure, but issues already in flight run to
    /// completion and are recorded.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Fetch`] if either repository cannot be read.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run());
        let source = self.migration.source();
        let target = self.migration.target();

        info!(repo = %source, "Fetching source issues");
        let issues = self.host.fetch_source_issues(source).await?;
        info!(repo = %target, "Fetching target repository");
        let snapshot = self.host.fetch_target_repository(target).await?;

        summary.issues_found = issues.len();
        if issues.is_empty() {
            warn!(repo = %source, "No open issues found");
            return Ok(summary);
        }
        info!(count = issues.len(), "Found open issues");

        let reconciler = Reconciler::new(target.clone(), &snapshot);
        let transfer = IssueTransfer::new(
            &self.host,
            &reconciler,
            &snapshot.id,
            self.config.update_retry(),
        );

        if self.config.dry_run() {
            for issue in &issues {
                let plan = transfer.plan(issue).await;
                summary.record_result(ProcessingResult::Planned { plan });
            }
            print_dry_run_preview(&self.migration, &summary);
            return Ok(summary);
        }

        // Set on the first failure under fail-fast; issues already in flight
        // still finish and are recorded.
        let fail_fast = self.config.failure_policy() == FailurePolicy::FailFast;
        let halted = AtomicBool::new(false);
        let halted = &halted;
        let transfer = &transfer;
        let mut results = stream::iter(&issues)
            .take_while(move |_| future::ready(!halted.load(Ordering::Acquire)))
            .map(move |issue| async move {
                let result = process_issue(transfer, issue).await;
                if fail_fast && result.is_failure() {
                    halted.store(true, Ordering::Release);
                }
                result
            })
            .buffered(self.config.concurrency());

        while let Some(result) = results.next().await {
            summary.record_result(result);
        }

        summary.aborted = halted.load(Ordering::Acquire) && summary.issues_not_attempted() > 0;
        if summary.aborted {
            error!(
                remaining = summary.issues_not_attempted(),
                "Stopped after failed issue"
            );
        }

        Ok(summary)
    }
}

async fn process_issue<H>(transfer: &IssueTransfer<'_, H>, issue: &Issue) -> ProcessingResult
where
    H: IssueHost + ?Sized,
{
    match transfer.run(issue).await {
        Ok(report) => ProcessingResult::Transferred { report },
        Err(e) => {
            error!(
                issue_number = issue.number,
                stage = %e.stage,
                error = %e.source,
                "Failed to transfer issue"
            );
            ProcessingResult::Failed {
                issue_number: e.issue_number,
                stage: e.stage,
                error: e.source.to_string(),
            }
        }
    }
}

fn print_dry_run_preview(migration: &MigrationConfig, summary: &RunSummary) {
    println!(
        "\n[DRY RUN] {} -> {}",
        migration.source(),
        migration.target()
    );
    println!("  Found {} open issues:\n", summary.issues_found);

    let plans = summary.results.iter().filter_map(|result| match result {
        ProcessingResult::Planned { plan } => Some(plan),
        _ => None,
    });

    for (i, plan) in plans.enumerate() {
        println!(
            "  [{}/{}] #{} {}",
            i + 1,
            summary.issues_found,
            plan.source_number,
            plan.title
        );
        print_plan_details(plan);
    }

    println!();
}

fn print_plan_details(plan: &IssuePlan) {
    if !plan.labels.is_empty() {
        println!("    Would assign labels: {}", plan.labels.join(", "));
    }
    if !plan.labels_to_create.is_empty() {
        println!(
            "    Would create labels: {}",
            plan.labels_to_create.join(", ")
        );
    }
    match &plan.milestone {
        Some(MilestonePlan::Existing { title, number }) => {
            println!("    Would assign milestone: {title} (#{number})");
        }
        Some(MilestonePlan::Create { title }) => {
            println!("    Would create milestone: {title}");
        }
        Some(MilestonePlan::Planned { title }) => {
            println!("    Would assign milestone: {title} (created earlier in this run)");
        }
        None => {}
    }
}

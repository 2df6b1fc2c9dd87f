//! Run summary types.

use super::result::ProcessingResult;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of open issues found in the source repository.
    pub issues_found: usize,

    /// Number of issues transferred.
    pub issues_transferred: usize,

    /// Number of issues planned (dry run).
    pub issues_planned: usize,

    /// Number of issues that failed.
    pub issues_failed: usize,

    /// Number of transferred issues that received an update call.
    pub issues_updated: usize,

    /// Number of labels created (or planned, in a dry run).
    pub labels_created: usize,

    /// Number of milestones created (or planned, in a dry run).
    pub milestones_created: usize,

    /// Whether a failure stopped the batch before every issue was attempted.
    pub aborted: bool,

    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Per-issue results, in source order.
    pub results: Vec<ProcessingResult>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: ProcessingResult) {
        match &result {
            ProcessingResult::Transferred { report } => {
                self.issues_transferred += 1;
                self.labels_created += report.labels_created.len();
                if report.milestone_created {
                    self.milestones_created += 1;
                }
                if report.updated {
                    self.issues_updated += 1;
                }
            }
            ProcessingResult::Planned { plan } => {
                self.issues_planned += 1;
                self.labels_created += plan.labels_to_create.len();
                if plan.creates_milestone() {
                    self.milestones_created += 1;
                }
            }
            ProcessingResult::Failed { .. } => self.issues_failed += 1,
        }
        self.results.push(result);
    }

    /// Returns the number of issues that were never attempted.
    #[must_use]
    pub fn issues_not_attempted(&self) -> usize {
        self.issues_found.saturating_sub(self.results.len())
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.issues_failed > 0
    }

    /// Returns true if all operations were successful.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.issues_failed == 0 && !self.aborted
    }
}

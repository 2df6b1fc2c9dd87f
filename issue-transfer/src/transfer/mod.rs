//! Single-issue transfer.
//!
//! Moves one issue into the target repository and restores its labels and
//! milestone there. Each issue runs through
//! [`TransferStage`]s strictly in order; a failure stops the issue at the
//! stage it happened in.

mod error;
mod report;
mod stage;

pub use error::TransferError;
pub use report::{IssuePlan, IssueReport};
pub use stage::TransferStage;

use crate::host::{ApiError, IssueHost};
use crate::reconcile::Reconciler;
use crate::retry::RetryPolicy;
use crate::types::{Issue, IssueUpdate};
use tracing::{debug, info, info_span, Instrument};

/// Transfers issues into one target repository.
pub struct IssueTransfer<'a, H: ?Sized> {
    host: &'a H,
    reconciler: &'a Reconciler,
    target_repository_id: &'a str,
    update_retry: RetryPolicy,
}

impl<'a, H> IssueTransfer<'a, H>
where
    H: IssueHost + ?Sized,
{
    /// Creates a transfer bound to a host, reconciler and target repository id.
    pub fn new(
        host: &'a H,
        reconciler: &'a Reconciler,
        target_repository_id: &'a str,
        update_retry: RetryPolicy,
    ) -> Self {
        Self {
            host,
            reconciler,
            target_repository_id,
            update_retry,
        }
    }

    /// Transfers `issue` and reassigns its labels and milestone.
    ///
    /// This function:
    /// 1. Transfers the issue into the target repository
    /// 2. Ensures its labels exist there
    /// 3. Ensures its milestone exists there
    /// 4. Assigns both in a single update call, if there is anything to assign
    ///
    /// Reconciliation uses the labels and milestone of the source issue,
    /// since the transferred issue arrives without them.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError`] with the stage that failed. Nothing after
    /// the failing step is attempted.
    pub async fn run(&self, issue: &Issue) -> Result<IssueReport, TransferError> {
        let span = info_span!("transfer_issue", issue_number = issue.number);

        async {
            let issue_number = issue.number;
            let fail = |stage: TransferStage| {
                move |source: ApiError| TransferError {
                    issue_number,
                    stage,
                    source,
                }
            };

            info!(
                issue_id = %issue.id,
                target = %self.reconciler.repository(),
                "Transferring issue"
            );
            let transferred = self
                .host
                .transfer_issue(self.target_repository_id, &issue.id)
                .await
                .map_err(fail(TransferStage::Transferring))?;
            info!(url = %transferred.url, "Transferred");

            if !issue.has_metadata() {
                debug!("No labels or milestone to assign");
                return Ok(IssueReport {
                    source_number: issue.number,
                    target_number: transferred.number,
                    url: transferred.url,
                    labels: Vec::new(),
                    labels_created: Vec::new(),
                    milestone: None,
                    milestone_created: false,
                    updated: false,
                });
            }

            let labels = self
                .reconciler
                .reconcile_labels(self.host, &issue.labels)
                .await
                .map_err(fail(TransferStage::Transferred))?;

            let milestone = self
                .reconciler
                .reconcile_milestone(self.host, issue.milestone.as_ref())
                .await
                .map_err(fail(TransferStage::LabelsReconciled))?;

            let mut report = IssueReport {
                source_number: issue.number,
                target_number: transferred.number,
                url: transferred.url.clone(),
                labels: labels.names.clone(),
                labels_created: labels.created,
                milestone: milestone.as_ref().map(|m| m.number),
                milestone_created: milestone.as_ref().is_some_and(|m| m.created),
                updated: false,
            };

            let Some(update) = IssueUpdate::new(transferred.number, labels.names, report.milestone)
            else {
                return Ok(report);
            };

            if update.labels.is_some() {
                info!("Assigning labels to transferred issue");
            }
            let repository = self.reconciler.repository();
            self.update_retry
                .run("update_issue", || self.host.update_issue(repository, &update))
                .await
                .map_err(fail(TransferStage::MilestoneReconciled))?;
            info!("Transferred issue updated");

            report.updated = true;
            Ok(report)
        }
        .instrument(span)
        .await
    }

    /// Describes what [`IssueTransfer::run`] would do, without calling the host.
    pub async fn plan(&self, issue: &Issue) -> IssuePlan {
        let labels_to_create = self.reconciler.plan_labels(&issue.labels).await;
        let milestone = self
            .reconciler
            .plan_milestone(issue.milestone.as_ref())
            .await;

        IssuePlan {
            source_number: issue.number,
            title: issue.title.clone(),
            labels: issue.labels.iter().map(|label| label.name.clone()).collect(),
            labels_to_create,
            milestone,
        }
    }
}

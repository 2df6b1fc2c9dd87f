//! Label and milestone reconciliation.
//!
//! Before labels or a milestone can be assigned to a transferred issue they
//! must exist in the target repository. The [`Reconciler`] looks them up in
//! a session registry seeded from the target snapshot, creates whatever is
//! missing, and records each creation so later issues reuse it.

mod labels;
mod milestones;

pub use labels::LabelRegistry;
pub use milestones::MilestoneRegistry;

use crate::config::RepoCoordinate;
use crate::host::{ApiError, IssueHost};
use crate::types::{Label, Milestone, TargetRepository};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Outcome of reconciling the labels of one issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelReconciliation {
    /// Label names to assign, in source order.
    pub names: Vec<String>,

    /// Labels that had to be created for this issue.
    pub created: Vec<String>,
}

/// Resolved milestone of one issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneResolution {
    /// Milestone title.
    pub title: String,

    /// Milestone number in the target repository.
    pub number: u64,

    /// Whether the milestone was created for this issue.
    pub created: bool,
}

/// What a dry run would do with a milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MilestonePlan {
    /// Reuse an existing milestone.
    Existing {
        /// Milestone title.
        title: String,
        /// Milestone number.
        number: u64,
    },

    /// Create the milestone.
    Create {
        /// Milestone title.
        title: String,
    },

    /// Reuse a milestone an earlier issue in this run will create.
    Planned {
        /// Milestone title.
        title: String,
    },
}

/// Ensures labels and milestones exist in the target repository.
///
/// Registries sit behind async mutexes held across the create call, so the
/// check-then-create step is atomic when several issues are processed at once.
#[derive(Debug)]
pub struct Reconciler {
    repository: RepoCoordinate,
    labels: Mutex<LabelRegistry>,
    milestones: Mutex<MilestoneRegistry>,
}

impl Reconciler {
    /// Creates a reconciler for `repository` seeded from its snapshot.
    pub fn new(repository: RepoCoordinate, snapshot: &TargetRepository) -> Self {
        Self {
            repository,
            labels: Mutex::new(LabelRegistry::from_snapshot(&snapshot.labels)),
            milestones: Mutex::new(MilestoneRegistry::from_snapshot(&snapshot.milestones)),
        }
    }

    /// Returns the repository being reconciled.
    pub fn repository(&self) -> &RepoCoordinate {
        &self.repository
    }

    /// Creates every label in `labels` that does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns the first [`ApiError`] from a create call. Labels created
    /// before the failure stay recorded.
    pub async fn reconcile_labels<H>(
        &self,
        host: &H,
        labels: &[Label],
    ) -> Result<LabelReconciliation, ApiError>
    where
        H: IssueHost + ?Sized,
    {
        let mut outcome = LabelReconciliation::default();

        for label in labels {
            let mut registry = self.labels.lock().await;
            if registry.contains(&label.name) {
                debug!(label = %label.name, "Label exists in target repository");
            } else {
                let created = host.create_label(&self.repository, label).await?;
                info!(label = %created.name, url = %created.url, "Label created");
                registry.insert(label.name.clone());
                outcome.created.push(label.name.clone());
            }
            outcome.names.push(label.name.clone());
        }

        Ok(outcome)
    }

    /// Resolves `milestone` to a number, creating it if no milestone with
    /// the same title exists.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the create call.
    pub async fn reconcile_milestone<H>(
        &self,
        host: &H,
        milestone: Option<&Milestone>,
    ) -> Result<Option<MilestoneResolution>, ApiError>
    where
        H: IssueHost + ?Sized,
    {
        let Some(milestone) = milestone else {
            return Ok(None);
        };

        let mut registry = self.milestones.lock().await;
        if let Some(number) = registry.number(&milestone.title) {
            debug!(milestone = %milestone.title, number, "Milestone exists in target repository");
            return Ok(Some(MilestoneResolution {
                title: milestone.title.clone(),
                number,
                created: false,
            }));
        }

        let created = host.create_milestone(&self.repository, milestone).await?;
        info!(
            milestone = %created.title,
            number = created.number,
            url = %created.url,
            "Milestone created"
        );
        registry.insert(milestone.title.clone(), created.number);

        Ok(Some(MilestoneResolution {
            title: milestone.title.clone(),
            number: created.number,
            created: true,
        }))
    }

    /// Returns the labels a real run would create for this issue, marking
    /// them as known so later issues do not plan them again.
    pub async fn plan_labels(&self, labels: &[Label]) -> Vec<String> {
        let mut registry = self.labels.lock().await;
        labels
            .iter()
            .filter(|label| registry.insert(label.name.clone()))
            .map(|label| label.name.clone())
            .collect()
    }

    /// Returns what a real run would do with this milestone.
    pub async fn plan_milestone(&self, milestone: Option<&Milestone>) -> Option<MilestonePlan> {
        let milestone = milestone?;
        let mut registry = self.milestones.lock().await;
        let title = milestone.title.clone();

        Some(match registry.number(&title) {
            Some(number) => MilestonePlan::Existing { title, number },
            None if registry.plan(&title) => MilestonePlan::Create { title },
            None => MilestonePlan::Planned { title },
        })
    }
}

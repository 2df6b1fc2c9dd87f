//! Issue transfer stages.

use serde::Serialize;
use std::fmt;

/// Progress of a single issue through a transfer.
///
/// Stages advance in declaration order. A failed issue reports the stage it
/// was in when the failing call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStage {
    /// Read from the source repository.
    Fetched,
    /// Transfer mutation in flight.
    Transferring,
    /// Issue now lives in the target repository.
    Transferred,
    /// Labels exist in the target repository.
    LabelsReconciled,
    /// Milestone exists in the target repository.
    MilestoneReconciled,
    /// Labels and milestone assigned.
    Updated,
}

impl TransferStage {
    /// Returns the stage as a string for logs and summaries.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetched => "fetched",
            Self::Transferring => "transferring",
            Self::Transferred => "transferred",
            Self::LabelsReconciled => "labels_reconciled",
            Self::MilestoneReconciled => "milestone_reconciled",
            Self::Updated => "updated",
        }
    }
}

impl fmt::Display for TransferStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

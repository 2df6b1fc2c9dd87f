//! Processing result types.

use crate::transfer::{IssuePlan, IssueReport, TransferStage};

/// Result of processing a single issue.
#[derive(Debug, Clone)]
pub enum ProcessingResult {
    /// Issue transferred.
    Transferred {
        /// What happened to the issue.
        report: IssueReport,
    },

    /// Dry run: issue planned but not transferred.
    Planned {
        /// What a real run would do.
        plan: IssuePlan,
    },

    /// Processing failed.
    Failed {
        /// Issue number in the source repository.
        issue_number: u64,
        /// Stage the issue was in when it failed.
        stage: TransferStage,
        /// Error message.
        error: String,
    },
}

impl ProcessingResult {
    /// Returns the source issue number.
    #[must_use]
    pub fn issue_number(&self) -> u64 {
        match self {
            Self::Transferred { report } => report.source_number,
            Self::Planned { plan } => plan.source_number,
            Self::Failed { issue_number, .. } => *issue_number,
        }
    }

    /// Returns true if processing failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

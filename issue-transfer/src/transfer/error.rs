//! Issue transfer error types.

use super::TransferStage;
use crate::host::ApiError;
use thiserror::Error;

/// A transfer that failed part-way through.
#[derive(Debug, Error)]
#[error("Issue #{issue_number} failed while {stage}: {source}")]
pub struct TransferError {
    /// Issue number in the source repository.
    pub issue_number: u64,

    /// Stage the issue was in when the failure happened.
    pub stage: TransferStage,

    /// Underlying API error.
    #[source]
    pub source: ApiError,
}

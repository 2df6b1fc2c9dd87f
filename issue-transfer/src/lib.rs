#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod host;
pub mod rate_limit;
pub mod reconcile;
pub mod retry;
pub mod runner;
pub mod summary;
pub mod transfer;
pub mod types;

pub use config::{ConfigError, MigrationConfig, ParseRepoError, RepoCoordinate};
pub use host::{ApiError, GitHubHost, IssueHost};
pub use rate_limit::{
    check_core_rate_limit, ensure_core_rate_limit, wait_if_needed, RateLimitInfo,
};
pub use reconcile::{
    LabelReconciliation, LabelRegistry, MilestonePlan, MilestoneRegistry, MilestoneResolution,
    Reconciler,
};
pub use retry::RetryPolicy;
pub use runner::{FailurePolicy, Runner, RunnerConfig, RunnerError};
pub use summary::{ProcessingResult, RunSummary};
pub use transfer::{IssuePlan, IssueReport, IssueTransfer, TransferError, TransferStage};
pub use types::{
    CreatedLabel, CreatedMilestone, Issue, IssueUpdate, Label, Milestone, MilestoneState,
    TargetMilestone, TargetRepository, TransferredIssue,
};

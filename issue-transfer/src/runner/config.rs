//! Runner configuration.

use crate::retry::RetryPolicy;

/// What to do after an issue fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the batch; later issues are not attempted.
    #[default]
    FailFast,
    /// Record the failure and continue with the next issue.
    Continue,
}

/// Configuration for a transfer run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Whether to preview changes without transferring anything.
    dry_run: bool,
    /// Maximum number of issues processed at once.
    concurrency: usize,
    /// Behaviour after a failed issue.
    failure_policy: FailurePolicy,
    /// Retry policy for the final update call.
    update_retry: RetryPolicy,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    ///
    /// A concurrency of 0 is treated as 1.
    pub fn new(dry_run: bool, concurrency: usize) -> Self {
        Self {
            dry_run,
            concurrency: concurrency.max(1),
            failure_policy: FailurePolicy::default(),
            update_retry: RetryPolicy::default(),
        }
    }

    /// Sets the failure policy.
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Sets the retry policy for the update call.
    pub fn with_update_retry(mut self, update_retry: RetryPolicy) -> Self {
        self.update_retry = update_retry;
        self
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the max number of issues processed at once.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Returns the failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Returns the retry policy for the update call.
    pub fn update_retry(&self) -> RetryPolicy {
        self.update_retry
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new(false, 1)
    }
}

//! In-memory host that records every call.

#![allow(dead_code)]

use async_trait::async_trait;
use issue_transfer::{
    ApiError, CreatedLabel, CreatedMilestone, Issue, IssueHost, IssueUpdate, Label, Milestone,
    MilestoneState, RepoCoordinate, TargetMilestone, TargetRepository, TransferredIssue,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// A call made against the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchSource,
    FetchTarget,
    Transfer {
        issue_id: String,
    },
    CreateLabel {
        name: String,
    },
    CreateMilestone {
        title: String,
    },
    Update {
        issue_number: u64,
        labels: Option<Vec<String>>,
        milestone: Option<u64>,
    },
}

pub struct RecordingHost {
    issues: Vec<Issue>,
    target: TargetRepository,
    fail_fetch: bool,
    failing_transfers: HashSet<String>,
    transfer_delays: HashMap<String, Duration>,
    failing_labels: HashSet<String>,
    failing_milestones: HashSet<String>,
    update_failures: Mutex<VecDeque<(u16, String)>>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingHost {
    pub fn new(issues: Vec<Issue>, target: TargetRepository) -> Self {
        Self {
            issues,
            target,
            fail_fetch: false,
            failing_transfers: HashSet::new(),
            transfer_delays: HashMap::new(),
            failing_labels: HashSet::new(),
            failing_milestones: HashSet::new(),
            update_failures: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Makes the transfer of the issue with this node id fail.
    pub fn fail_transfer(mut self, issue_id: &str) -> Self {
        self.failing_transfers.insert(issue_id.to_string());
        self
    }

    /// Delays the transfer of the issue with this node id.
    pub fn delay_transfer(mut self, issue_id: &str, delay: Duration) -> Self {
        self.transfer_delays.insert(issue_id.to_string(), delay);
        self
    }

    /// Makes creation of the label with this name fail.
    pub fn fail_label(mut self, name: &str) -> Self {
        self.failing_labels.insert(name.to_string());
        self
    }

    /// Makes creation of the milestone with this title fail.
    pub fn fail_milestone(mut self, title: &str) -> Self {
        self.failing_milestones.insert(title.to_string());
        self
    }

    /// Makes the next update calls fail with these statuses, in order.
    pub fn fail_updates(self, statuses: &[u16]) -> Self {
        self.update_failures
            .lock()
            .unwrap()
            .extend(statuses.iter().map(|status| (*status, "update failed".to_string())));
        self
    }

    /// Makes the next update call fail with this status and message.
    pub fn fail_update_with(self, status: u16, message: &str) -> Self {
        self.update_failures
            .lock()
            .unwrap()
            .push_back((status, message.to_string()));
        self
    }

    /// Makes the source fetch fail.
    pub fn fail_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_labels(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateLabel { name } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn created_milestones(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateMilestone { title } => Some(title),
                _ => None,
            })
            .collect()
    }

    pub fn transfers(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Transfer { issue_id } => Some(issue_id),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<(u64, Option<Vec<String>>, Option<u64>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update {
                    issue_number,
                    labels,
                    milestone,
                } => Some((issue_number, labels, milestone)),
                _ => None,
            })
            .collect()
    }

    /// Calls other than the two initial fetches.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::FetchSource | Call::FetchTarget))
            .collect()
    }

    fn record(&self, call: Call) -> usize {
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        calls.len()
    }
}

#[async_trait]
impl IssueHost for RecordingHost {
    async fn fetch_source_issues(
        &self,
        repository: &RepoCoordinate,
    ) -> Result<Vec<Issue>, ApiError> {
        self.record(Call::FetchSource);
        if self.fail_fetch {
            return Err(ApiError::RepositoryNotFound {
                repository: repository.full_name(),
            });
        }
        Ok(self.issues.clone())
    }

    async fn fetch_target_repository(
        &self,
        _repository: &RepoCoordinate,
    ) -> Result<TargetRepository, ApiError> {
        self.record(Call::FetchTarget);
        Ok(self.target.clone())
    }

    async fn transfer_issue(
        &self,
        target_repository_id: &str,
        issue_id: &str,
    ) -> Result<TransferredIssue, ApiError> {
        assert_eq!(target_repository_id, self.target.id);
        if let Some(delay) = self.transfer_delays.get(issue_id) {
            tokio::time::sleep(*delay).await;
        }
        let seq = self.record(Call::Transfer {
            issue_id: issue_id.to_string(),
        });
        if self.failing_transfers.contains(issue_id) {
            return Err(ApiError::Status {
                status: 403,
                message: "Resource not accessible by integration".to_string(),
            });
        }
        let number = 100 + seq as u64;
        Ok(TransferredIssue {
            id: format!("{issue_id}-moved"),
            number,
            url: format!("https://github.com/octo/new/issues/{number}"),
        })
    }

    async fn create_label(
        &self,
        repository: &RepoCoordinate,
        label: &Label,
    ) -> Result<CreatedLabel, ApiError> {
        self.record(Call::CreateLabel {
            name: label.name.clone(),
        });
        if self.failing_labels.contains(&label.name) {
            return Err(ApiError::Status {
                status: 422,
                message: "Validation Failed".to_string(),
            });
        }
        Ok(CreatedLabel {
            name: label.name.clone(),
            url: format!("https://github.com/{repository}/issues/labels"),
        })
    }

    async fn create_milestone(
        &self,
        repository: &RepoCoordinate,
        milestone: &Milestone,
    ) -> Result<CreatedMilestone, ApiError> {
        let seq = self.record(Call::CreateMilestone {
            title: milestone.title.clone(),
        });
        if self.failing_milestones.contains(&milestone.title) {
            return Err(ApiError::Status {
                status: 422,
                message: "Validation Failed".to_string(),
            });
        }
        let number = 50 + seq as u64;
        Ok(CreatedMilestone {
            number,
            title: milestone.title.clone(),
            url: format!("https://github.com/{repository}/milestone/{number}"),
        })
    }

    async fn update_issue(
        &self,
        _repository: &RepoCoordinate,
        update: &IssueUpdate,
    ) -> Result<(), ApiError> {
        self.record(Call::Update {
            issue_number: update.issue_number,
            labels: update.labels.clone(),
            milestone: update.milestone,
        });
        match self.update_failures.lock().unwrap().pop_front() {
            Some((status, message)) => Err(ApiError::Status { status, message }),
            None => Ok(()),
        }
    }
}

pub fn label(name: &str) -> Label {
    Label {
        name: name.to_string(),
        color: "ededed".to_string(),
        description: Some(format!("{name} label")),
    }
}

pub fn milestone(title: &str) -> Milestone {
    Milestone {
        title: title.to_string(),
        description: String::new(),
        due_on: None,
        state: MilestoneState::Open,
    }
}

pub fn issue(number: u64, labels: &[&str], milestone_title: Option<&str>) -> Issue {
    Issue {
        id: format!("I_{number}"),
        number,
        title: format!("Issue {number}"),
        body: String::new(),
        labels: labels.iter().map(|name| label(name)).collect(),
        milestone: milestone_title.map(milestone),
    }
}

pub fn target(labels: &[&str], milestones: &[(&str, u64)]) -> TargetRepository {
    TargetRepository {
        id: "R_target".to_string(),
        labels: labels.iter().map(|name| label(name)).collect(),
        milestones: milestones
            .iter()
            .map(|(title, number)| TargetMilestone {
                number: *number,
                title: title.to_string(),
            })
            .collect(),
    }
}

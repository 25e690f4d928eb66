use crate::enums::job_status::JobStatus;

/// Where one observation of a job currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Submitted,
    Polling(JobStatus),
    Reconciling,
    Resolved,
    Failed,
}

impl LifecycleState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleState::Resolved | LifecycleState::Failed)
    }

    pub fn can_transition_to(&self, next: &LifecycleState) -> bool {
        use LifecycleState::*;

        match (self, next) {
            (Resolved | Failed, _) => false,
            (Submitted | Polling(_), Polling(_)) => true,
            (Submitted | Polling(_), Reconciling) => true,
            (Reconciling, Resolved) => true,
            (Submitted | Polling(_) | Reconciling, Failed) => true,
            _ => false,
        }
    }
}

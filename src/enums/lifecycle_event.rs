use serde::Serialize;
use crate::enums::failure_reason::FailureReason;
use crate::enums::job_status::JobStatus;
use crate::structs::analysis_record::AnalysisRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LifecycleEvent {
    StatusChanged(JobStatus),
    Resolved(AnalysisRecord),
    Failed(FailureReason),
}

impl LifecycleEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleEvent::Resolved(_) | LifecycleEvent::Failed(_))
    }
}

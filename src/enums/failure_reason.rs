use std::fmt;
use serde::{Deserialize, Serialize};

/// Why an observation ended in `LifecycleEvent::Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The backend reported FAILURE for the job.
    BackendFailure,
    /// Network or server failure while polling or fetching.
    Transport(String),
    /// The job succeeded but its stored result never became readable.
    ResultNotFound { attempts: u32 },
    /// Fetching the stored result failed with a non-retryable error.
    ResultUnavailable(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::BackendFailure => write!(f, "analysis failed on the backend"),
            FailureReason::Transport(msg) => write!(f, "failed to check status: {}", msg),
            FailureReason::ResultNotFound { .. } => write!(f, "result not found after retries"),
            FailureReason::ResultUnavailable(msg) => write!(f, "failed to fetch result: {}", msg),
        }
    }
}

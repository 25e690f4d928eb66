use crate::enums::api_error::ApiError;
use crate::enums::job_status::JobStatus;

/// How a status polling loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Terminal(JobStatus),
    Cancelled,
    TransportError(ApiError),
}

use serde::Deserialize;
use crate::enums::job_status::JobStatus;

#[derive(Deserialize, Debug, Clone)]
pub struct JobStatusResponse {
    pub status: JobStatus,
}

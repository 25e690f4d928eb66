use async_trait::async_trait;
use crate::enums::api_error::ApiError;
use crate::enums::job_status::JobStatus;
use crate::structs::analysis_record::AnalysisRecord;
use crate::structs::analysis_summary::AnalysisSummary;
use crate::structs::api::submit_job_request::SubmitJobRequest;
use crate::structs::job_handle::JobHandle;
use crate::structs::statistics::Statistics;

/// The review backend's request/response contract. Every call is a single
/// round trip; implementations never retry.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    async fn submit_job(&self, request: SubmitJobRequest) -> Result<JobHandle, ApiError>;

    async fn job_status(&self, task_id: &str) -> Result<JobStatus, ApiError>;

    /// `ApiError::NotFound` while the result has not been persisted yet.
    async fn fetch_result(&self, task_id: &str) -> Result<AnalysisRecord, ApiError>;

    async fn list_analyses(&self) -> Result<Vec<AnalysisSummary>, ApiError>;

    async fn statistics(&self) -> Result<Statistics, ApiError>;
}

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use crate::config::constants::{
    ANALYSES_FALLBACK_MESSAGE, ANALYSES_PATH, ANALYSIS_FALLBACK_MESSAGE, ANALYSIS_PATH,
    JOB_STATUS_PATH, STATISTICS_FALLBACK_MESSAGE, STATISTICS_PATH, STATUS_FALLBACK_MESSAGE,
    SUBMIT_FALLBACK_MESSAGE, SUBMIT_JOB_PATH,
};
use crate::enums::api_error::ApiError;
use crate::enums::job_status::JobStatus;
use crate::errors::ReviewResult;
use crate::structs::analysis_record::AnalysisRecord;
use crate::structs::analysis_summary::AnalysisSummary;
use crate::structs::api::analyses_response::AnalysesResponse;
use crate::structs::api::error_body::ErrorBody;
use crate::structs::api::job_status_response::JobStatusResponse;
use crate::structs::api::submit_job_request::SubmitJobRequest;
use crate::structs::api::submit_job_response::SubmitJobResponse;
use crate::structs::config::api_config::ApiConfig;
use crate::structs::job_handle::JobHandle;
use crate::structs::statistics::Statistics;
use crate::traits::review_backend::ReviewBackend;

#[derive(Clone)]
pub struct HttpReviewBackend {
    base_url: String,
    client: Client,
}

impl HttpReviewBackend {
    pub fn new(base_url: &str, timeout: Duration) -> ReviewResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &ApiConfig) -> ReviewResult<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.request_timeout_secs))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn task_url(&self, prefix: &str, task_id: &str) -> String {
        format!("{}{}/{}/", self.base_url, prefix, task_id)
    }

    async fn get(&self, url: &str) -> Result<Response, ApiError> {
        log::debug!("GET {}", url);
        self.client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), Self::error_message(&body, fallback)));
        }

        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) fn error_message(body: &str, fallback: &str) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[async_trait]
impl ReviewBackend for HttpReviewBackend {
    async fn submit_job(&self, request: SubmitJobRequest) -> Result<JobHandle, ApiError> {
        let url = self.url(SUBMIT_JOB_PATH);
        log::debug!("POST {} (pr #{})", url, request.pr_number);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body: SubmitJobResponse = Self::read_json(response, SUBMIT_FALLBACK_MESSAGE).await?;

        match body.task_id {
            Some(task_id) if !task_id.is_empty() => Ok(JobHandle::new(&task_id)),
            _ => Err(ApiError::Rejected {
                status,
                message: body.error.unwrap_or_else(|| SUBMIT_FALLBACK_MESSAGE.to_string()),
            }),
        }
    }

    async fn job_status(&self, task_id: &str) -> Result<JobStatus, ApiError> {
        let response = self.get(&self.task_url(JOB_STATUS_PATH, task_id)).await?;
        let body: JobStatusResponse = Self::read_json(response, STATUS_FALLBACK_MESSAGE).await?;
        Ok(body.status)
    }

    async fn fetch_result(&self, task_id: &str) -> Result<AnalysisRecord, ApiError> {
        let response = self.get(&self.task_url(ANALYSIS_PATH, task_id)).await?;
        Self::read_json(response, ANALYSIS_FALLBACK_MESSAGE).await
    }

    async fn list_analyses(&self) -> Result<Vec<AnalysisSummary>, ApiError> {
        let response = self.get(&self.url(ANALYSES_PATH)).await?;
        let body: AnalysesResponse = Self::read_json(response, ANALYSES_FALLBACK_MESSAGE).await?;
        Ok(body.results)
    }

    async fn statistics(&self) -> Result<Statistics, ApiError> {
        let response = self.get(&self.url(STATISTICS_PATH)).await?;
        Self::read_json(response, STATISTICS_FALLBACK_MESSAGE).await
    }
}

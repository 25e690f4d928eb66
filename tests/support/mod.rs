use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;
use pr_review_cli::enums::analysis_payload::AnalysisPayload;
use pr_review_cli::enums::api_error::ApiError;
use pr_review_cli::enums::job_status::JobStatus;
use pr_review_cli::structs::analysis_record::{AnalysisRecord, FileResult};
use pr_review_cli::structs::analysis_summary::AnalysisSummary;
use pr_review_cli::structs::api::submit_job_request::SubmitJobRequest;
use pr_review_cli::structs::job_handle::JobHandle;
use pr_review_cli::structs::statistics::Statistics;
use pr_review_cli::traits::review_backend::ReviewBackend;

/// In-memory backend answering from scripted queues. An exhausted status
/// queue answers PENDING, an exhausted result queue answers not found.
#[derive(Default)]
pub struct ScriptedBackend {
    submit_response: Mutex<Option<Result<JobHandle, ApiError>>>,
    statuses: Mutex<VecDeque<Result<JobStatus, ApiError>>>,
    results: Mutex<VecDeque<Result<AnalysisRecord, ApiError>>>,
    stored: Mutex<HashMap<String, AnalysisRecord>>,
    analyses: Mutex<Vec<AnalysisSummary>>,
    statistics_response: Mutex<Option<Result<Statistics, ApiError>>>,
    status_delay: Mutex<Option<Duration>>,
    submitted: Mutex<Vec<SubmitJobRequest>>,
    status_calls: AtomicUsize,
    result_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submit(self, response: Result<JobHandle, ApiError>) -> Self {
        *self.submit_response.lock().unwrap() = Some(response);
        self
    }

    pub fn with_statuses(self, statuses: Vec<Result<JobStatus, ApiError>>) -> Self {
        self.statuses.lock().unwrap().extend(statuses);
        self
    }

    pub fn with_results(self, results: Vec<Result<AnalysisRecord, ApiError>>) -> Self {
        self.results.lock().unwrap().extend(results);
        self
    }

    pub fn with_stored(self, record: AnalysisRecord) -> Self {
        self.analyses.lock().unwrap().push(summary_of(&record));
        self.stored.lock().unwrap().insert(record.task_id.clone(), record);
        self
    }

    pub fn with_listed(self, summary: AnalysisSummary) -> Self {
        self.analyses.lock().unwrap().push(summary);
        self
    }

    pub fn with_statistics(self, response: Result<Statistics, ApiError>) -> Self {
        *self.statistics_response.lock().unwrap() = Some(response);
        self
    }

    /// Every status request takes this long to answer.
    pub fn with_status_delay(self, delay: Duration) -> Self {
        *self.status_delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn result_calls(&self) -> usize {
        self.result_calls.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<SubmitJobRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewBackend for ScriptedBackend {
    async fn submit_job(&self, request: SubmitJobRequest) -> Result<JobHandle, ApiError> {
        self.submitted.lock().unwrap().push(request);
        self.submit_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(JobHandle::new("task-1")))
    }

    async fn job_status(&self, _task_id: &str) -> Result<JobStatus, ApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.status_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(JobStatus::Pending))
    }

    async fn fetch_result(&self, task_id: &str) -> Result<AnalysisRecord, ApiError> {
        self.result_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(scripted) = self.results.lock().unwrap().pop_front() {
            return scripted;
        }
        self.stored
            .lock()
            .unwrap()
            .get(task_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Task ID not found".to_string()))
    }

    async fn list_analyses(&self) -> Result<Vec<AnalysisSummary>, ApiError> {
        Ok(self.analyses.lock().unwrap().clone())
    }

    async fn statistics(&self) -> Result<Statistics, ApiError> {
        self.statistics_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(ApiError::NotFound("no statistics endpoint".to_string())))
    }
}

pub fn not_found() -> ApiError {
    ApiError::NotFound("Task ID not found".to_string())
}

pub fn record(task_id: &str, issue_types: &[&str]) -> AnalysisRecord {
    let issues: Vec<_> = issue_types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"type": t, "line": i + 1, "description": format!("issue {}", i)}))
        .collect();

    AnalysisRecord {
        task_id: task_id.to_string(),
        repo_url: "https://github.com/owner/repo".to_string(),
        pr_number: 7,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        file_results: vec![FileResult {
            file_name: "src/lib.rs".to_string(),
            analysis: AnalysisPayload::Structured(json!({ "issues": issues })),
        }],
    }
}

pub fn summary_of(record: &AnalysisRecord) -> AnalysisSummary {
    AnalysisSummary {
        task_id: record.task_id.clone(),
        repo_url: record.repo_url.clone(),
        pr_number: record.pr_number,
        created_at: record.created_at,
        file_count: record.file_results.len(),
    }
}

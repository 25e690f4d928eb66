use std::sync::Arc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use crate::enums::reconcile_error::ReconcileError;
use crate::structs::analysis_record::AnalysisRecord;
use crate::structs::retry_policy::RetryPolicy;
use crate::traits::review_backend::ReviewBackend;

/// Fetches the stored result of a finished job. A job can report SUCCESS
/// before its result is readable, so not-found responses are retried on the
/// policy's schedule. Every other error ends the fetch at once.
#[derive(Clone)]
pub struct ResultReconciler {
    backend: Arc<dyn ReviewBackend>,
    policy: RetryPolicy,
}

impl ResultReconciler {
    pub fn new(backend: Arc<dyn ReviewBackend>, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn with_policy(&self, policy: RetryPolicy) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            policy,
        }
    }

    pub async fn fetch(&self, task_id: &str, cancel: &CancellationToken) -> Result<AnalysisRecord, ReconcileError> {
        let mut attempt: u32 = 0;

        loop {
            let delay = self.policy.delay_before_attempt(attempt);
            if !delay.is_zero() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(ReconcileError::Cancelled),
                    _ = sleep(delay) => {}
                }
            }

            attempt = attempt.saturating_add(1);
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ReconcileError::Cancelled),
                result = self.backend.fetch_result(task_id) => result,
            };

            if cancel.is_cancelled() {
                return Err(ReconcileError::Cancelled);
            }

            match result {
                Ok(record) => {
                    log::debug!("Result for {} fetched on attempt {}", task_id, attempt);
                    return Ok(record);
                }
                Err(error) if error.is_not_found() => {
                    if attempt >= self.policy.max_attempts() {
                        log::warn!("Result for {} still missing after {} attempts", task_id, attempt);
                        return Err(ReconcileError::Exhausted { attempts: attempt });
                    }
                    log::debug!(
                        "Result for {} not readable yet, retry {}/{}",
                        task_id,
                        attempt,
                        self.policy.max_not_found_retries
                    );
                }
                Err(error) => {
                    log::warn!("Fetching result for {} failed: {}", task_id, error);
                    return Err(ReconcileError::Api(error));
                }
            }
        }
    }
}

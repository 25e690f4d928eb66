use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use crate::config::constants::sleep_duration_millis;
use crate::enums::job_status::JobStatus;
use crate::enums::poll_outcome::PollOutcome;
use crate::structs::config::polling_config::PollingConfig;
use crate::structs::job_handle::JobHandle;
use crate::traits::review_backend::ReviewBackend;

/// Queries a job's status on a fixed interval until it reaches a terminal
/// status, fails with a transport error, or is cancelled. At most one request
/// is in flight per poller.
#[derive(Clone)]
pub struct StatusPoller {
    backend: Arc<dyn ReviewBackend>,
    interval: Duration,
}

/// A polling loop running on its own task.
pub struct PollerHandle {
    cancel: CancellationToken,
    task: JoinHandle<PollOutcome>,
}

impl PollerHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub async fn outcome(self) -> PollOutcome {
        self.task.await.unwrap_or(PollOutcome::Cancelled)
    }
}

impl StatusPoller {
    pub fn new(backend: Arc<dyn ReviewBackend>, interval: Duration) -> Self {
        Self { backend, interval }
    }

    pub fn from_config(backend: Arc<dyn ReviewBackend>, config: &PollingConfig) -> Self {
        Self::new(backend, sleep_duration_millis(config.interval_ms))
    }

    pub fn start<F>(&self, handle: JobHandle, on_status: F) -> PollerHandle
    where
        F: FnMut(JobStatus) + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let poller = self.clone();

        let task = tokio::spawn(async move { poller.run(&handle, on_status, &token).await });

        PollerHandle { cancel, task }
    }

    /// Runs the loop on the current task. `on_status` sees every successful
    /// response, repeats included, and is never called once `cancel` fired.
    pub async fn run<F>(&self, handle: &JobHandle, mut on_status: F, cancel: &CancellationToken) -> PollOutcome
    where
        F: FnMut(JobStatus),
    {
        let mut polls: u64 = 0;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return PollOutcome::Cancelled,
                _ = sleep(self.interval) => {}
            }

            polls += 1;
            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => return PollOutcome::Cancelled,
                response = self.backend.job_status(handle.task_id()) => response,
            };

            // A response that lands after cancellation is dropped.
            if cancel.is_cancelled() {
                return PollOutcome::Cancelled;
            }

            match response {
                Ok(status) => {
                    log::debug!("Job {} is {} (poll #{})", handle, status, polls);
                    on_status(status);
                    if status.is_terminal() {
                        return PollOutcome::Terminal(status);
                    }
                }
                Err(error) if error.is_not_found() => {
                    log::debug!("Job {} not registered yet (poll #{})", handle, polls);
                }
                Err(error) => {
                    log::warn!("Status check for {} failed: {}", handle, error);
                    return PollOutcome::TransportError(error);
                }
            }
        }
    }
}

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use dashmap::DashMap;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;
use crate::config::constants::{STATISTICS_FETCH_CONCURRENCY, TERMINAL_MEMORY_LIMIT};
use crate::enums::failure_reason::FailureReason;
use crate::enums::job_status::JobStatus;
use crate::enums::lifecycle_event::LifecycleEvent;
use crate::enums::lifecycle_state::LifecycleState;
use crate::enums::poll_outcome::PollOutcome;
use crate::enums::reconcile_error::ReconcileError;
use crate::errors::{ReviewError, ReviewResult};
use crate::services::result_reconciler::ResultReconciler;
use crate::services::statistics_aggregator::StatisticsAggregator;
use crate::services::status_poller::StatusPoller;
use crate::structs::analysis_record::AnalysisRecord;
use crate::structs::analysis_summary::AnalysisSummary;
use crate::structs::api::submit_job_request::SubmitJobRequest;
use crate::structs::config::config::Config;
use crate::structs::job_handle::JobHandle;
use crate::structs::retry_policy::RetryPolicy;
use crate::structs::statistics::Statistics;
use crate::traits::review_backend::ReviewBackend;

struct Session {
    generation: u64,
    cancel: CancellationToken,
}

/// Records a finished job. The map holds at most `TERMINAL_MEMORY_LIMIT`
/// entries; when full, an arbitrary other job is forgotten and will simply be
/// polled again if observed.
fn remember_terminal(terminal: &DashMap<String, JobStatus>, task_id: &str, status: JobStatus) {
    if terminal.len() >= TERMINAL_MEMORY_LIMIT && !terminal.contains_key(task_id) {
        let evicted = terminal.iter().map(|entry| entry.key().clone()).next();
        if let Some(evicted) = evicted {
            terminal.remove(&evicted);
        }
    }
    terminal.insert(task_id.to_string(), status);
}

/// Drives review jobs from submission to a single terminal event.
///
/// Each `observe` call starts one session for the handle and supersedes any
/// earlier session of the same handle. A session polls the job status, then
/// fetches the stored result, and reports through its `Observation`. Events
/// from a cancelled or superseded session are never delivered.
pub struct JobLifecycleCoordinator {
    backend: Arc<dyn ReviewBackend>,
    poller: StatusPoller,
    reconciler: ResultReconciler,
    sessions: Arc<DashMap<String, Session>>,
    terminal: Arc<DashMap<String, JobStatus>>,
    next_generation: AtomicU64,
}

impl JobLifecycleCoordinator {
    pub fn new(backend: Arc<dyn ReviewBackend>, poller: StatusPoller, reconciler: ResultReconciler) -> Self {
        Self {
            backend,
            poller,
            reconciler,
            sessions: Arc::new(DashMap::new()),
            terminal: Arc::new(DashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    pub fn from_config(backend: Arc<dyn ReviewBackend>, config: &Config) -> Self {
        let poller = StatusPoller::from_config(Arc::clone(&backend), &config.polling);
        let reconciler = ResultReconciler::new(Arc::clone(&backend), RetryPolicy::from(&config.reconciler));
        Self::new(backend, poller, reconciler)
    }

    pub async fn submit(&self, repo_url: &str, pr_number: u64, github_token: Option<String>) -> ReviewResult<JobHandle> {
        let repo_url = repo_url.trim();
        Self::validate_submission(repo_url, pr_number)?;

        let request = SubmitJobRequest {
            repo_url: repo_url.to_string(),
            pr_number,
            github_token: github_token.filter(|token| !token.trim().is_empty()),
        };

        let handle = self
            .backend
            .submit_job(request)
            .await
            .map_err(ReviewError::from_submission)?;

        log::info!("🚀 Submitted review of {} #{} as job {}", repo_url, pr_number, handle);
        Ok(handle)
    }

    fn validate_submission(repo_url: &str, pr_number: u64) -> ReviewResult<()> {
        let has_host = repo_url
            .strip_prefix("https://")
            .or_else(|| repo_url.strip_prefix("http://"))
            .is_some_and(|rest| !rest.trim_matches('/').is_empty());

        if !has_host {
            return Err(ReviewError::validation_error(
                "repo_url",
                repo_url,
                "must be an http(s) repository URL",
                Some("e.g. https://github.com/owner/repo"),
            ));
        }

        if pr_number == 0 {
            return Err(ReviewError::validation_error(
                "pr_number",
                "0",
                "must be a positive integer",
                None,
            ));
        }

        Ok(())
    }

    /// Starts observing a job. Observing a handle that already has a live
    /// session cancels that session.
    pub fn observe(&self, handle: JobHandle) -> Observation {
        let task_id = handle.task_id().to_string();
        let cancel = CancellationToken::new();
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let previous = self.sessions.insert(
            task_id.clone(),
            Session {
                generation,
                cancel: cancel.clone(),
            },
        );
        if let Some(previous) = previous {
            log::debug!("Observation #{} of {} superseded by #{}", previous.generation, handle, generation);
            previous.cancel.cancel();
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let task = ObservationTask {
            handle: handle.clone(),
            poller: self.poller.clone(),
            reconciler: self.reconciler.clone(),
            terminal: Arc::clone(&self.terminal),
            cancel: cancel.clone(),
            sink: EventSink {
                task_id,
                generation,
                cancel: cancel.clone(),
                sessions: Arc::clone(&self.sessions),
                tx,
                state: LifecycleState::Submitted,
            },
        };
        tokio::spawn(task.run());

        Observation {
            handle,
            events: UnboundedReceiverStream::new(rx),
            cancel,
        }
    }

    /// One status query, no polling.
    pub async fn status(&self, handle: &JobHandle) -> ReviewResult<JobStatus> {
        let status = self
            .backend
            .job_status(handle.task_id())
            .await
            .map_err(|e| ReviewError::from_api("check job status", e))?;

        if status.is_terminal() {
            remember_terminal(&self.terminal, handle.task_id(), status);
        }
        Ok(status)
    }

    /// Loads a stored analysis with the not-found retry budget but without
    /// the post-success settle delay.
    pub async fn load_analysis(&self, handle: &JobHandle) -> ReviewResult<AnalysisRecord> {
        let reconciler = self.reconciler.with_policy(self.reconciler.policy().without_settle());

        reconciler
            .fetch(handle.task_id(), &CancellationToken::new())
            .await
            .map_err(|error| match error {
                ReconcileError::Exhausted { attempts } => ReviewError::not_found("Analysis", handle.task_id(), attempts),
                ReconcileError::Api(e) => ReviewError::from_api("load analysis", e),
                ReconcileError::Cancelled => ReviewError::system_error("load analysis", "cancelled"),
            })
    }

    pub async fn list_analyses(&self) -> ReviewResult<Vec<AnalysisSummary>> {
        self.backend
            .list_analyses()
            .await
            .map_err(|e| ReviewError::from_api("list analyses", e))
    }

    /// Server-side statistics, or client-side aggregation when the backend
    /// has no statistics endpoint.
    pub async fn statistics(&self) -> ReviewResult<Statistics> {
        match self.backend.statistics().await {
            Ok(statistics) => Ok(statistics),
            Err(error) if error.is_not_found() => {
                log::info!("Statistics endpoint unavailable, aggregating locally");
                self.compute_statistics().await
            }
            Err(error) => Err(ReviewError::from_api("load statistics", error)),
        }
    }

    pub async fn compute_statistics(&self) -> ReviewResult<Statistics> {
        let summaries = self.list_analyses().await?;

        let records: Vec<AnalysisRecord> = stream::iter(summaries)
            .map(|summary| {
                let backend = Arc::clone(&self.backend);
                async move { backend.fetch_result(&summary.task_id).await }
            })
            .buffered(STATISTICS_FETCH_CONCURRENCY)
            .filter_map(|result| async move {
                match result {
                    Ok(record) => Some(Ok(record)),
                    Err(error) if error.is_not_found() => None,
                    Err(error) => Some(Err(error)),
                }
            })
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| ReviewError::from_api("load analysis", e))?;

        Ok(StatisticsAggregator::aggregate(&records))
    }
}

/// Events of one observation. Ends after the terminal event, or as soon as
/// the observation is cancelled. Dropping it cancels the session.
pub struct Observation {
    handle: JobHandle,
    events: UnboundedReceiverStream<LifecycleEvent>,
    cancel: CancellationToken,
}

impl Observation {
    pub fn handle(&self) -> &JobHandle {
        &self.handle
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Stream for Observation {
    type Item = LifecycleEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.cancel.is_cancelled() {
            return Poll::Ready(None);
        }
        Pin::new(&mut self.events).poll_next(cx)
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct EventSink {
    task_id: String,
    generation: u64,
    cancel: CancellationToken,
    sessions: Arc<DashMap<String, Session>>,
    tx: UnboundedSender<LifecycleEvent>,
    state: LifecycleState,
}

impl EventSink {
    fn is_current(&self) -> bool {
        !self.cancel.is_cancelled()
            && self
                .sessions
                .get(&self.task_id)
                .is_some_and(|session| session.generation == self.generation)
    }

    fn advance(&mut self, next: LifecycleState) -> bool {
        if !self.state.can_transition_to(&next) {
            log::warn!("Ignoring transition {:?} -> {:?} for {}", self.state, next, self.task_id);
            return false;
        }
        self.state = next;
        true
    }

    fn status(&mut self, status: JobStatus) {
        if !self.is_current() {
            log::warn!("Dropping stale status {} for {}", status, self.task_id);
            return;
        }
        if self.advance(LifecycleState::Polling(status)) {
            let _ = self.tx.send(LifecycleEvent::StatusChanged(status));
        }
    }

    fn reconciling(&mut self) -> bool {
        self.advance(LifecycleState::Reconciling)
    }

    fn finish(&mut self, event: LifecycleEvent) {
        let next = match &event {
            LifecycleEvent::Resolved(_) => LifecycleState::Resolved,
            LifecycleEvent::Failed(_) => LifecycleState::Failed,
            LifecycleEvent::StatusChanged(_) => return,
        };

        if !self.is_current() {
            log::warn!("Dropping terminal event for superseded observation of {}", self.task_id);
            return;
        }
        if self.advance(next) {
            let _ = self.tx.send(event);
        }
    }

    fn release(&self) {
        self.sessions
            .remove_if(&self.task_id, |_, session| session.generation == self.generation);
    }
}

struct ObservationTask {
    handle: JobHandle,
    poller: StatusPoller,
    reconciler: ResultReconciler,
    terminal: Arc<DashMap<String, JobStatus>>,
    cancel: CancellationToken,
    sink: EventSink,
}

impl ObservationTask {
    async fn run(mut self) {
        self.drive().await;
        self.sink.release();
    }

    async fn drive(&mut self) {
        let known = self.terminal.get(self.handle.task_id()).map(|status| *status);

        let status = match known {
            Some(status) => {
                log::debug!("Job {} already finished as {}, not polling", self.handle, status);
                self.sink.status(status);
                status
            }
            None => {
                let sink = &mut self.sink;
                let outcome = self
                    .poller
                    .run(&self.handle, |status| sink.status(status), &self.cancel)
                    .await;

                match outcome {
                    PollOutcome::Terminal(status) => {
                        remember_terminal(&self.terminal, self.handle.task_id(), status);
                        status
                    }
                    PollOutcome::Cancelled => {
                        log::debug!("Observation of {} cancelled while polling", self.handle);
                        return;
                    }
                    PollOutcome::TransportError(error) => {
                        self.sink
                            .finish(LifecycleEvent::Failed(FailureReason::Transport(error.message().to_string())));
                        return;
                    }
                }
            }
        };

        if status == JobStatus::Failure {
            log::info!("❌ Job {} failed on the backend", self.handle);
            self.sink.finish(LifecycleEvent::Failed(FailureReason::BackendFailure));
            return;
        }

        if !self.sink.reconciling() {
            return;
        }

        match self.reconciler.fetch(self.handle.task_id(), &self.cancel).await {
            Ok(record) => {
                log::info!("✅ Job {} resolved with {} file(s)", self.handle, record.file_results.len());
                self.sink.finish(LifecycleEvent::Resolved(record));
            }
            Err(ReconcileError::Exhausted { attempts }) => {
                self.sink.finish(LifecycleEvent::Failed(FailureReason::ResultNotFound { attempts }));
            }
            Err(ReconcileError::Api(error)) => {
                self.sink
                    .finish(LifecycleEvent::Failed(FailureReason::ResultUnavailable(error.message().to_string())));
            }
            Err(ReconcileError::Cancelled) => {
                log::debug!("Observation of {} cancelled while fetching the result", self.handle);
            }
        }
    }
}

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use pr_review_cli::enums::api_error::ApiError;
use pr_review_cli::enums::reconcile_error::ReconcileError;
use pr_review_cli::services::result_reconciler::ResultReconciler;
use pr_review_cli::structs::retry_policy::RetryPolicy;
use crate::support::{not_found, record, ScriptedBackend};

fn reconciler(backend: &Arc<ScriptedBackend>) -> ResultReconciler {
    ResultReconciler::new(backend.clone(), RetryPolicy::default())
}

#[tokio::test(start_paused = true)]
async fn retries_until_the_result_is_readable() {
    let expected = record("task-1", &["bugs"]);
    let backend = Arc::new(ScriptedBackend::new().with_results(vec![
        Err(not_found()),
        Err(not_found()),
        Ok(expected.clone()),
    ]));
    let start = Instant::now();

    let fetched = reconciler(&backend).fetch("task-1", &CancellationToken::new()).await;

    assert_eq!(fetched, Ok(expected));
    assert_eq!(backend.result_calls(), 3);
    // settle + two retry delays
    assert!(start.elapsed() >= Duration::from_millis(5000));
    assert!(start.elapsed() < Duration::from_millis(6000));
}

#[tokio::test(start_paused = true)]
async fn gives_up_after_the_retry_cap() {
    let backend = Arc::new(ScriptedBackend::new());
    let start = Instant::now();

    let fetched = reconciler(&backend).fetch("task-1", &CancellationToken::new()).await;

    assert_eq!(fetched, Err(ReconcileError::Exhausted { attempts: 4 }));
    assert_eq!(backend.result_calls(), 4);
    assert!(start.elapsed() >= Duration::from_millis(7000));
    assert_eq!(fetched.unwrap_err().to_string(), "result not found after retries");
}

#[tokio::test(start_paused = true)]
async fn other_errors_are_not_retried() {
    let error = ApiError::Rejected { status: 500, message: "boom".to_string() };
    let backend = Arc::new(ScriptedBackend::new().with_results(vec![Err(error.clone())]));

    let fetched = reconciler(&backend).fetch("task-1", &CancellationToken::new()).await;

    assert_eq!(fetched, Err(ReconcileError::Api(error)));
    assert_eq!(backend.result_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_during_settle_delay() {
    let backend = Arc::new(ScriptedBackend::new().with_results(vec![Ok(record("task-1", &[]))]));
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();

    tokio::spawn(async move {
        sleep(Duration::from_millis(500)).await;
        trigger.cancel();
    });

    let fetched = reconciler(&backend).fetch("task-1", &cancel).await;

    assert_eq!(fetched, Err(ReconcileError::Cancelled));
    assert_eq!(backend.result_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn zero_retries_means_one_attempt() {
    let backend = Arc::new(ScriptedBackend::new());
    let policy = RetryPolicy::new(Duration::ZERO, Duration::from_millis(10), 0);

    let fetched = ResultReconciler::new(backend.clone(), policy)
        .fetch("task-1", &CancellationToken::new())
        .await;

    assert_eq!(fetched, Err(ReconcileError::Exhausted { attempts: 1 }));
    assert_eq!(backend.result_calls(), 1);
}

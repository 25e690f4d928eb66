pub mod analysis_payload;
pub mod api_error;
pub mod commands;
pub mod failure_reason;
pub mod issue_type;
pub mod job_status;
pub mod lifecycle_event;
pub mod lifecycle_state;
pub mod poll_outcome;
pub mod reconcile_error;

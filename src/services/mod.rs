pub mod http_backend;
pub mod job_coordinator;
pub mod result_parser;
pub mod result_reconciler;
pub mod statistics_aggregator;
pub mod status_poller;

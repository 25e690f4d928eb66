pub mod analysis_record;
pub mod analysis_summary;
pub mod api;
pub mod cli;
pub mod config;
pub mod issue;
pub mod issue_type_stats;
pub mod job_handle;
pub mod parsed_analysis;
pub mod retry_policy;
pub mod statistics;

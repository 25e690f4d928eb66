use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2000;
pub const DEFAULT_MAX_NOT_FOUND_RETRIES: u32 = 3;
pub const MAX_NOT_FOUND_RETRIES_LIMIT: u32 = 100;

pub const API_BASE_URL_ENV: &str = "PR_REVIEW_API_URL";
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const CONFIG_DIR_NAME: &str = "pr-review";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const SUBMIT_JOB_PATH: &str = "/start_task/";
pub const JOB_STATUS_PATH: &str = "/task_status_view";
pub const ANALYSIS_PATH: &str = "/api/get_pr_analysis";
pub const ANALYSES_PATH: &str = "/api/get_all_analyses/";
pub const STATISTICS_PATH: &str = "/api/statistics/";

pub const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to start analysis";
pub const STATUS_FALLBACK_MESSAGE: &str = "Failed to get task status";
pub const ANALYSIS_FALLBACK_MESSAGE: &str = "Failed to get analysis";
pub const ANALYSES_FALLBACK_MESSAGE: &str = "Failed to get analyses";
pub const STATISTICS_FALLBACK_MESSAGE: &str = "Failed to get statistics";

pub const SPINNER_FRAME_INTERVAL_MS: u64 = 150;
pub const STATISTICS_FETCH_CONCURRENCY: usize = 4;
pub const TERMINAL_MEMORY_LIMIT: usize = 1024;

pub fn sleep_duration_millis(milliseconds: u64) -> Duration {
    Duration::from_millis(milliseconds)
}

use crate::config::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_MAX_NOT_FOUND_RETRIES, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_DELAY_MS, DEFAULT_SETTLE_DELAY_MS, GITHUB_TOKEN_ENV,
};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_base_url() -> String {
        DEFAULT_API_BASE_URL.to_string()
    }

    pub fn default_request_timeout_secs() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_SECS
    }

    pub fn default_github_token_env() -> String {
        GITHUB_TOKEN_ENV.to_string()
    }

    pub fn default_poll_interval_ms() -> u64 {
        DEFAULT_POLL_INTERVAL_MS
    }

    pub fn default_settle_delay_ms() -> u64 {
        DEFAULT_SETTLE_DELAY_MS
    }

    pub fn default_retry_delay_ms() -> u64 {
        DEFAULT_RETRY_DELAY_MS
    }

    pub fn default_max_not_found_retries() -> u32 {
        DEFAULT_MAX_NOT_FOUND_RETRIES
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{API_BASE_URL_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, MAX_NOT_FOUND_RETRIES_LIMIT};
use crate::errors::{ReviewError, ReviewResult};
use crate::structs::config::config::Config;

const SAMPLE_CONFIG: &str = r#"# pr-review configuration

[api]
# Review backend the jobs are submitted to
base_url = "http://127.0.0.1:8080"
request_timeout_secs = 30
# Environment variable holding a GitHub token for private repositories
github_token_env = "GITHUB_TOKEN"

[polling]
# How often job status is queried while a review runs
interval_ms = 2000

[reconciler]
# Wait before the first result fetch after the job reports SUCCESS
settle_delay_ms = 1000
# Wait between fetches while the stored result is not readable yet
retry_delay_ms = 2000
# Not-found retries before giving up
max_not_found_retries = 3
"#;

pub struct ConfigManager;

impl ConfigManager {
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load() -> ReviewResult<Config> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Config::default(),
        };

        if let Ok(base_url) = std::env::var(API_BASE_URL_ENV) {
            log::debug!("Using backend URL from {}", API_BASE_URL_ENV);
            config.api.base_url = base_url;
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> ReviewResult<Config> {
        log::info!("📋 Loading config from: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| ReviewError::ConfigurationFileError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn create_sample_config() -> ReviewResult<PathBuf> {
        let path = Self::config_path()
            .ok_or_else(|| ReviewError::system_error("locate home directory", "no home directory"))?;
        Self::write_sample_config(&path)?;
        Ok(path)
    }

    pub fn write_sample_config(path: &Path) -> ReviewResult<()> {
        if path.exists() {
            return Err(ReviewError::config_error(
                "Configuration file already exists",
                None,
                Some(&format!("Edit {} or remove it first", path.display())),
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, SAMPLE_CONFIG)?;
        Ok(())
    }

    pub fn validate_config(config: &Config) -> ReviewResult<()> {
        let base_url = config.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ReviewError::config_error(
                "Backend URL must be an http(s) URL",
                Some("api.base_url"),
                Some("e.g. http://127.0.0.1:8080"),
            ));
        }

        if config.api.request_timeout_secs == 0 {
            return Err(ReviewError::config_error(
                "Request timeout must be greater than zero",
                Some("api.request_timeout_secs"),
                None,
            ));
        }

        if config.polling.interval_ms == 0 {
            return Err(ReviewError::config_error(
                "Poll interval must be greater than zero",
                Some("polling.interval_ms"),
                Some("The default is 2000"),
            ));
        }

        if config.reconciler.retry_delay_ms == 0 {
            return Err(ReviewError::config_error(
                "Retry delay must be greater than zero",
                Some("reconciler.retry_delay_ms"),
                Some("The default is 2000"),
            ));
        }

        if config.reconciler.max_not_found_retries > MAX_NOT_FOUND_RETRIES_LIMIT {
            return Err(ReviewError::config_error(
                &format!("Not-found retries must be at most {}", MAX_NOT_FOUND_RETRIES_LIMIT),
                Some("reconciler.max_not_found_retries"),
                Some("The default is 3"),
            ));
        }

        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReconcilerConfig {
    #[serde(default = "ConfigHelper::default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    #[serde(default = "ConfigHelper::default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default = "ConfigHelper::default_max_not_found_retries")]
    pub max_not_found_retries: u32,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: ConfigHelper::default_settle_delay_ms(),
            retry_delay_ms: ConfigHelper::default_retry_delay_ms(),
            max_not_found_retries: ConfigHelper::default_max_not_found_retries(),
        }
    }
}

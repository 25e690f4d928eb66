use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::helpers::timestamp_helper::deserialize_timestamp;

/// One row of the stored analyses list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub task_id: String,
    pub repo_url: String,
    pub pr_number: u64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub file_count: usize,
}

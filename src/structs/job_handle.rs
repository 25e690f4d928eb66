use std::fmt;
use serde::{Deserialize, Serialize};

/// Identifies one submitted review job. Only created from a successful
/// submission or an explicit task id supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobHandle {
    task_id: String,
}

impl JobHandle {
    pub fn new(task_id: &str) -> Self {
        Self {
            task_id: task_id.to_string(),
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.task_id)
    }
}

use serde::{Deserialize, Serialize};
use crate::structs::issue::Issue;

/// Normalized form of one file's analysis. `raw` is set only when no
/// structured data could be extracted, in which case `issues` is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedAnalysis {
    pub issues: Vec<Issue>,
    pub raw: Option<String>,
}

impl ParsedAnalysis {
    pub fn structured(issues: Vec<Issue>) -> Self {
        Self { issues, raw: None }
    }

    pub fn degraded(raw: &str) -> Self {
        Self {
            issues: Vec::new(),
            raw: Some(raw.to_string()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.raw.is_some()
    }
}

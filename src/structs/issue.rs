use serde::{Deserialize, Serialize};
use crate::enums::issue_type::IssueType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type", default)]
    pub issue_type: IssueType,
    pub line: Option<u64>,
    pub description: Option<String>,
    pub suggestion: Option<String>,
}

impl Issue {
    pub fn new(issue_type: IssueType) -> Self {
        Self {
            issue_type,
            line: None,
            description: None,
            suggestion: None,
        }
    }

    pub fn at_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }
}

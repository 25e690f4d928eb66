use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::analysis_payload::AnalysisPayload;
use crate::helpers::timestamp_helper::deserialize_timestamp;
use crate::services::result_parser::ResultParser;
use crate::structs::parsed_analysis::ParsedAnalysis;

/// A review result as persisted by the backend once the job has written it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub task_id: String,
    pub repo_url: String,
    pub pr_number: u64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "analysis_result", default)]
    pub file_results: Vec<FileResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileResult {
    pub file_name: String,
    #[serde(default)]
    pub analysis: AnalysisPayload,
}

impl FileResult {
    pub fn parsed(&self) -> ParsedAnalysis {
        ResultParser::normalize(&self.analysis)
    }
}

impl AnalysisRecord {
    pub fn parsed_files(&self) -> Vec<(&str, ParsedAnalysis)> {
        self.file_results
            .iter()
            .map(|file| (file.file_name.as_str(), file.parsed()))
            .collect()
    }

    pub fn total_issues(&self) -> usize {
        self.file_results
            .iter()
            .map(|file| file.parsed().issues.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_record() {
        let record: AnalysisRecord = serde_json::from_value(json!({
            "id": 7,
            "task_id": "abc",
            "repo_url": "https://github.com/owner/repo",
            "pr_number": 12,
            "created_at": "2025-03-01T10:15:00.123456Z",
            "analysis_result": [
                {"file_name": "main.py", "analysis": "```json\n{\"issues\": [{\"type\": \"bugs\", \"line\": 3}]}\n```"},
                {"file_name": "util.py", "analysis": {"issues": []}}
            ]
        }))
        .unwrap();

        assert_eq!(record.pr_number, 12);
        assert_eq!(record.file_results.len(), 2);
        assert_eq!(record.total_issues(), 1);
        assert!(matches!(record.file_results[1].analysis, AnalysisPayload::Structured(_)));
    }

    #[test]
    fn missing_results_default_to_empty() {
        let record: AnalysisRecord = serde_json::from_value(json!({
            "task_id": "abc",
            "repo_url": "https://github.com/owner/repo",
            "pr_number": 1,
            "created_at": "2025-03-01T10:15:00"
        }))
        .unwrap();
        assert!(record.file_results.is_empty());
        assert_eq!(record.total_issues(), 0);
    }
}

use serde_json::{Map, Value};
use crate::enums::analysis_payload::AnalysisPayload;
use crate::enums::issue_type::IssueType;
use crate::structs::issue::Issue;
use crate::structs::parsed_analysis::ParsedAnalysis;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";
const ISSUES_FIELD: &str = "issues";
const TYPE_FIELD: &str = "type";
const LINE_FIELD: &str = "line";
const DESCRIPTION_FIELD: &str = "description";
const SUGGESTION_FIELD: &str = "suggestion";

/// Turns the loosely shaped per-file analysis into a typed issue list.
/// Never fails: payloads without usable structure come back as raw text.
pub struct ResultParser;

impl ResultParser {
    pub fn normalize(payload: &AnalysisPayload) -> ParsedAnalysis {
        match payload {
            AnalysisPayload::Structured(value) => ParsedAnalysis::structured(Self::issues_from_value(value)),
            AnalysisPayload::Text(text) => Self::normalize_text(text),
        }
    }

    pub fn normalize_text(text: &str) -> ParsedAnalysis {
        // A fence that is present but unparseable is not retried as a whole.
        let candidate = Self::extract_fenced_block(text).unwrap_or(text);

        match serde_json::from_str::<Value>(candidate) {
            Ok(value) if value.is_object() || value.is_array() => {
                ParsedAnalysis::structured(Self::issues_from_value(&value))
            }
            Ok(_) => {
                log::debug!("analysis decoded to a scalar, keeping raw text");
                ParsedAnalysis::degraded(text)
            }
            Err(e) => {
                log::debug!("analysis is not structured ({}), keeping raw text", e);
                ParsedAnalysis::degraded(text)
            }
        }
    }

    /// Returns the contents of the first ```` ```json ```` block, or failing
    /// that the first ```` ``` ```` block, without its language tag.
    pub fn extract_fenced_block(text: &str) -> Option<&str> {
        Self::find_block(text, JSON_FENCE)
            .or_else(|| Self::find_block(text, FENCE))
            .map(Self::strip_language_tag)
    }

    fn find_block<'a>(text: &'a str, opener: &str) -> Option<&'a str> {
        // ASCII lowercasing keeps byte offsets stable.
        let start = text.to_ascii_lowercase().find(opener)? + opener.len();
        let rest = &text[start..];
        let end = rest.find(FENCE)?;
        Some(rest[..end].trim())
    }

    fn strip_language_tag(block: &str) -> &str {
        match block.split_once('\n') {
            Some((first, rest))
                if !first.trim().is_empty()
                    && first.trim().chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') =>
            {
                rest.trim()
            }
            _ => block,
        }
    }

    fn issues_from_value(value: &Value) -> Vec<Issue> {
        let entries = match value {
            Value::Object(map) => match map.get(ISSUES_FIELD) {
                Some(Value::Array(items)) => items.as_slice(),
                _ => &[],
            },
            Value::Array(items) => items.as_slice(),
            _ => &[],
        };

        entries.iter().filter_map(Self::issue_from_value).collect()
    }

    fn issue_from_value(entry: &Value) -> Option<Issue> {
        match entry {
            Value::Object(fields) => Some(Self::issue_from_fields(fields)),
            Value::String(text) => Some(Issue::new(IssueType::Unknown).with_description(text)),
            other => {
                log::debug!("skipping issue entry of unexpected shape: {}", other);
                None
            }
        }
    }

    fn issue_from_fields(fields: &Map<String, Value>) -> Issue {
        let issue_type = fields
            .get(TYPE_FIELD)
            .and_then(Value::as_str)
            .map(IssueType::from_label)
            .unwrap_or(IssueType::Unknown);

        Issue {
            issue_type,
            line: fields.get(LINE_FIELD).and_then(Self::line_number),
            description: fields.get(DESCRIPTION_FIELD).and_then(Self::text_field),
            suggestion: fields.get(SUGGESTION_FIELD).and_then(Self::text_field),
        }
    }

    fn line_number(value: &Value) -> Option<u64> {
        match value {
            Value::Number(number) => number.as_u64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    fn text_field(value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn fenced_block_inside_prose() {
        let text = "Here is my review.\n```json\n{\"issues\":[{\"type\":\"bugs\",\"line\":4}]}\n```\nHope it helps!";
        let parsed = ResultParser::normalize(&AnalysisPayload::text(text));

        assert_eq!(parsed.raw, None);
        assert_eq!(parsed.issues, vec![Issue::new(IssueType::Bugs).at_line(4)]);
    }

    #[test]
    fn untagged_fence() {
        let text = "```\n{\"issues\":[{\"type\":\"style\",\"description\":\"long line\"}]}\n```";
        let parsed = ResultParser::normalize_text(text);

        assert_eq!(parsed.issues.len(), 1);
        assert_eq!(parsed.issues[0].issue_type, IssueType::Style);
        assert_eq!(parsed.issues[0].description.as_deref(), Some("long line"));
    }

    #[test]
    fn other_language_tag_is_stripped() {
        let text = "```javascript\n{\"issues\":[{\"type\":\"performance\"}]}\n```";
        let parsed = ResultParser::normalize_text(text);
        assert_eq!(parsed.issues[0].issue_type, IssueType::Performance);
    }

    #[test]
    fn plain_json_without_fence() {
        let parsed = ResultParser::normalize_text("{\"issues\": [{\"type\": \"best_practice\", \"line\": \"12\"}]}");
        assert_eq!(parsed.raw, None);
        assert_eq!(parsed.issues[0].issue_type, IssueType::BestPractice);
        assert_eq!(parsed.issues[0].line, Some(12));
    }

    #[test]
    fn free_text_degrades_to_raw() {
        let parsed = ResultParser::normalize_text("oops not json");
        assert_eq!(parsed, ParsedAnalysis::degraded("oops not json"));
    }

    #[test]
    fn broken_fence_degrades_to_raw() {
        let text = "```json\n{\"issues\": [\n```";
        let parsed = ResultParser::normalize_text(text);
        assert!(parsed.issues.is_empty());
        assert_eq!(parsed.raw.as_deref(), Some(text));
    }

    #[test]
    fn unterminated_fence_falls_back_to_whole_string() {
        let parsed = ResultParser::normalize_text("```json {\"issues\": []}");
        assert!(parsed.is_degraded());
    }

    #[test]
    fn empty_string() {
        let parsed = ResultParser::normalize_text("");
        assert!(parsed.issues.is_empty());
        assert_eq!(parsed.raw.as_deref(), Some(""));
    }

    #[test]
    fn scalar_json_is_not_structure() {
        assert!(ResultParser::normalize_text("42").is_degraded());
        assert!(ResultParser::normalize_text("\"just a string\"").is_degraded());
    }

    #[test]
    fn structured_payload_passes_through() {
        let payload = AnalysisPayload::Structured(json!({
            "issues": [
                {"type": "bugs", "line": 1, "description": "off by one", "suggestion": "use <="},
                {"type": "warning", "description": "No files were found"},
                {"line": 9}
            ]
        }));
        let parsed = ResultParser::normalize(&payload);

        assert_eq!(parsed.raw, None);
        assert_eq!(parsed.issues.len(), 3);
        assert_eq!(parsed.issues[0].suggestion.as_deref(), Some("use <="));
        assert_eq!(parsed.issues[1].issue_type, IssueType::Unknown);
        assert_eq!(parsed.issues[2].issue_type, IssueType::Unknown);
        assert_eq!(parsed.issues[2].line, Some(9));
    }

    #[test]
    fn structured_without_issues_is_empty() {
        let parsed = ResultParser::normalize(&AnalysisPayload::Structured(json!({"summary": "fine"})));
        assert_eq!(parsed, ParsedAnalysis::structured(vec![]));

        let parsed = ResultParser::normalize(&AnalysisPayload::Structured(Value::Null));
        assert_eq!(parsed, ParsedAnalysis::structured(vec![]));
    }

    #[test]
    fn odd_issue_entries() {
        let parsed = ResultParser::normalize_text("[\"missing docstring\", 17, {\"type\": \"bug\", \"line\": -3}]");
        assert_eq!(parsed.issues.len(), 2);
        assert_eq!(parsed.issues[0].description.as_deref(), Some("missing docstring"));
        assert_eq!(parsed.issues[1].issue_type, IssueType::Bugs);
        assert_eq!(parsed.issues[1].line, None);
    }

    proptest! {
        #[test]
        fn normalize_is_total(text in ".*") {
            let parsed = ResultParser::normalize_text(&text);
            prop_assert!(parsed.raw.is_none() || parsed.issues.is_empty());
            if let Some(raw) = parsed.raw {
                prop_assert_eq!(raw, text);
            }
        }

        #[test]
        fn fenced_noise_is_total(prefix in "[a-z `\n]{0,20}", body in "[{}\\[\\]\":a-z0-9, \n`]{0,40}") {
            let text = format!("{}```json\n{}\n```", prefix, body);
            let parsed = ResultParser::normalize_text(&text);
            prop_assert!(parsed.raw.is_none() || parsed.issues.is_empty());
        }
    }
}

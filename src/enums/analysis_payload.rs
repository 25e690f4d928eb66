use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The per-file `analysis` field as the backend stores it: either the model's
/// raw text or an already decoded JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisPayload {
    Text(String),
    Structured(Value),
}

impl AnalysisPayload {
    pub fn text(content: &str) -> Self {
        AnalysisPayload::Text(content.to_string())
    }
}

impl Default for AnalysisPayload {
    fn default() -> Self {
        AnalysisPayload::Structured(Value::Null)
    }
}

use std::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum IssueType {
    Style,
    Bugs,
    Performance,
    BestPractice,
    Unknown,
}

impl IssueType {
    /// Every category the statistics page has a row for, in display order.
    pub const REPORTED: [IssueType; 4] = [
        IssueType::Style,
        IssueType::Bugs,
        IssueType::Performance,
        IssueType::BestPractice,
    ];

    /// Lenient mapping: anything unrecognised is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "style" => IssueType::Style,
            "bugs" | "bug" => IssueType::Bugs,
            "performance" => IssueType::Performance,
            "best_practice" | "best_practices" | "best-practice" => IssueType::BestPractice,
            _ => IssueType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Style => "style",
            IssueType::Bugs => "bugs",
            IssueType::Performance => "performance",
            IssueType::BestPractice => "best_practice",
            IssueType::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueType::Style => "Style Issues",
            IssueType::Bugs => "Bugs",
            IssueType::Performance => "Performance",
            IssueType::BestPractice => "Best Practices",
            IssueType::Unknown => "Other",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            IssueType::Style => "🎨",
            IssueType::Bugs => "🐛",
            IssueType::Performance => "⚡",
            IssueType::BestPractice => "✅",
            IssueType::Unknown => "❔",
        }
    }
}

impl From<String> for IssueType {
    fn from(label: String) -> Self {
        IssueType::from_label(&label)
    }
}

impl Default for IssueType {
    fn default() -> Self {
        IssueType::Unknown
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

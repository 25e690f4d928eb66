use std::fmt;
use std::error::Error as StdError;
use serde::{Deserialize, Serialize};
use crate::enums::api_error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReviewError {
    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // The backend refused to start a job
    SubmissionError {
        message: String,
    },

    // Network/API errors
    TransportError {
        operation: String,
        url: Option<String>,
        status_code: Option<u16>,
        reason: String,
    },

    // A stored result that never became readable
    NotFound {
        resource: String,
        task_id: String,
        attempts: u32,
    },

    // Parser errors
    ParseError {
        content_type: String,
        line_number: Option<usize>,
        reason: String,
    },

    // Validation errors
    ValidationError {
        field: String,
        value: String,
        constraint: String,
        suggestion: Option<String>,
    },

    // The job ran and failed on the backend
    JobFailed {
        task_id: String,
        reason: String,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },
}

impl ReviewError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn transport_error(operation: &str, reason: &str) -> Self {
        Self::TransportError {
            operation: operation.to_string(),
            url: None,
            status_code: None,
            reason: reason.to_string(),
        }
    }

    pub fn not_found(resource: &str, task_id: &str, attempts: u32) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            task_id: task_id.to_string(),
            attempts,
        }
    }

    pub fn validation_error(field: &str, value: &str, constraint: &str, suggestion: Option<&str>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn job_failed(task_id: &str, reason: &str) -> Self {
        Self::JobFailed {
            task_id: task_id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Maps a backend error raised while submitting a job. Rejections keep the
    /// backend's message verbatim.
    pub fn from_submission(error: ApiError) -> Self {
        match error {
            ApiError::Transport(reason) | ApiError::Serialization(reason) => {
                Self::transport_error("submit job", &reason)
            }
            other => Self::SubmissionError {
                message: other.message().to_string(),
            },
        }
    }

    /// Maps a backend error raised by a read-only request.
    pub fn from_api(operation: &str, error: ApiError) -> Self {
        let status_code = error.status_code();
        Self::TransportError {
            operation: operation.to_string(),
            url: None,
            status_code,
            reason: error.message().to_string(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::TransportError { .. } => true,
            Self::NotFound { .. } => true,
            Self::ValidationError { .. } => true,
            Self::ConfigurationError { .. } => true,
            Self::SubmissionError { .. } => true,
            Self::JobFailed { .. } => false,
            Self::SystemError { .. } => false,
            _ => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::JobFailed { .. } => ErrorSeverity::High,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::TransportError { .. } => ErrorSeverity::Medium,
            Self::NotFound { .. } => ErrorSeverity::Medium,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::SubmissionError { .. } => ErrorSeverity::Medium,
            Self::ValidationError { .. } => ErrorSeverity::Low,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::SubmissionError { message } => message.clone(),
            Self::TransportError { operation, url, status_code, reason } => {
                let mut msg = format!("Network error during {}: {}", operation, reason);
                if let Some(url) = url {
                    msg.push_str(&format!(" (URL: {})", url));
                }
                if let Some(code) = status_code {
                    msg.push_str(&format!(" (Status: {})", code));
                }
                msg
            }
            Self::NotFound { resource, task_id, attempts } => {
                format!("{} for task '{}' not found after {} attempts\n💡 Check the dashboard, the result may appear later", resource, task_id, attempts)
            }
            Self::ParseError { content_type, line_number, reason } => {
                let mut msg = format!("Parse error in {}: {}", content_type, reason);
                if let Some(line) = line_number {
                    msg.push_str(&format!(" (line {})", line));
                }
                msg
            }
            Self::ValidationError { field, value, constraint, suggestion } => {
                let mut msg = format!("Validation error for field '{}': value '{}' violates constraint '{}'", field, value, constraint);
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::JobFailed { task_id, reason } => {
                format!("Analysis {} failed: {}\n💡 Please try again", task_id, reason)
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for ReviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for ReviewError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for client operations
pub type ReviewResult<T> = Result<T, ReviewError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Log technical details and print the user-facing message
    pub fn handle_error(error: &ReviewError) {
        let severity = error.severity();

        log::error!("[{}] {}", severity.name(), error.technical_details());
        eprintln!("{} {}", severity.emoji(), error.user_message());

        if error.is_recoverable() {
            eprintln!("🔄 This error is recoverable - you can retry the operation");
        }
    }
}

impl From<std::io::Error> for ReviewError {
    fn from(error: std::io::Error) -> Self {
        ReviewError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ReviewError {
    fn from(error: serde_json::Error) -> Self {
        ReviewError::ParseError {
            content_type: "JSON".to_string(),
            line_number: Some(error.line()),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for ReviewError {
    fn from(error: toml::de::Error) -> Self {
        ReviewError::ParseError {
            content_type: "TOML".to_string(),
            line_number: None,
            reason: error.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for ReviewError {
    fn from(error: reqwest::Error) -> Self {
        ReviewError::TransportError {
            operation: "HTTP request".to_string(),
            url: error.url().map(|u| u.to_string()),
            status_code: error.status().map(|s| s.as_u16()),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_message_is_verbatim() {
        let error = ReviewError::from_submission(ApiError::RateLimited("Too many requests, slow down".to_string()));
        assert_eq!(error.to_string(), "Too many requests, slow down");
    }

    #[test]
    fn transport_failure_during_submit_is_not_a_rejection() {
        let error = ReviewError::from_submission(ApiError::Transport("connection refused".to_string()));
        assert!(matches!(error, ReviewError::TransportError { .. }));
        assert!(error.to_string().contains("connection refused"));
    }

    #[test]
    fn api_errors_keep_status_code() {
        let error = ReviewError::from_api(
            "list analyses",
            ApiError::Rejected { status: 500, message: "boom".to_string() },
        );
        match error {
            ReviewError::TransportError { status_code, reason, .. } => {
                assert_eq!(status_code, Some(500));
                assert_eq!(reason, "boom");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::High);
        assert_eq!(ReviewError::job_failed("t1", "boom").severity(), ErrorSeverity::High);
        assert!(!ReviewError::job_failed("t1", "boom").is_recoverable());
    }
}

use thiserror::Error;

/// Errors raised by a single backend round trip. Retry decisions are made
/// one level up, this layer never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            404 => ApiError::NotFound(message),
            401 | 403 => ApiError::Authentication(message),
            429 => ApiError::RateLimited(message),
            _ => ApiError::Rejected { status, message },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// The human readable part, without the class prefix.
    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg)
            | ApiError::Authentication(msg)
            | ApiError::RateLimited(msg)
            | ApiError::Transport(msg)
            | ApiError::Serialization(msg) => msg,
            ApiError::Rejected { message, .. } => message,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::NotFound(_) => Some(404),
            ApiError::Authentication(_) => None,
            ApiError::RateLimited(_) => Some(429),
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Serialization(_) => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Serialization(error.to_string())
    }
}

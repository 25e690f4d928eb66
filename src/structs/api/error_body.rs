use serde::Deserialize;

/// Whatever the backend put in an error response. Different endpoints use
/// different field names.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        [self.message, self.error, self.detail]
            .into_iter()
            .flatten()
            .find(|message| !message.trim().is_empty())
    }
}

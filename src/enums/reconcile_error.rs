use thiserror::Error;
use crate::enums::api_error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("result not found after retries")]
    Exhausted { attempts: u32 },

    #[error(transparent)]
    Api(ApiError),

    #[error("reconciliation cancelled")]
    Cancelled,
}

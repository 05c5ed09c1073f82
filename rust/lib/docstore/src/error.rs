use qrbox_core::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("document {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("document lock poisoned")]
    Lock,
}

impl From<DocError> for ServiceError {
    fn from(e: DocError) -> Self {
        match e {
            DocError::Corrupt { .. } => ServiceError::Corrupt(e.to_string()),
            DocError::Io(_) => ServiceError::Storage(e.to_string()),
            DocError::Serialization(_) | DocError::Lock => ServiceError::Internal(e.to_string()),
        }
    }
}

use qrbox_core::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("cannot encode QR code: {0}")]
    Encode(String),

    #[error("image encoding failed: {0}")]
    Image(String),
}

impl From<LabelError> for ServiceError {
    fn from(e: LabelError) -> Self {
        ServiceError::Internal(e.to_string())
    }
}

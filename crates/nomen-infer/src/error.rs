//! Collaborator failure type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Model not loaded: {0}")]
    NotLoaded(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<serde_json::Error> for InferError {
    fn from(e: serde_json::Error) -> Self {
        InferError::InvalidResponse(e.to_string())
    }
}

impl From<InferError> for nomen_core::Error {
    fn from(e: InferError) -> Self {
        nomen_core::Error::Collaborator(e.to_string())
    }
}

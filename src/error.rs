// ===============================
// src/error.rs
// ===============================
use serde::Serialize;
use thiserror::Error;

/// Backend failure mapped to something a form can show as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct TranslatedError {
    pub message: String,
    pub status: u16,
    pub field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Raised before any network call when the auth flag is false.
    #[error("not authenticated")]
    Unauthenticated,
    #[error(transparent)]
    Domain(#[from] TranslatedError),
}

impl SyncError {
    pub fn translated(&self) -> Option<&TranslatedError> {
        match self {
            SyncError::Domain(e) => Some(e),
            SyncError::Unauthenticated => None,
        }
    }
}

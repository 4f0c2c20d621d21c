use thiserror::Error;

/// Crate-wide error type
///
/// Admission errors (`NotFound`, `InvalidPin`, `SessionFull`) are terminal
/// for the call that produced them; callers may re-invoke with corrected
/// input but the core never retries on its own.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("session not found or ended")]
    NotFound,

    #[error("invalid security PIN")]
    InvalidPin,

    #[error("session is full")]
    SessionFull,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl SyncError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        SyncError::Validation(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        SyncError::Storage(msg.into())
    }
}

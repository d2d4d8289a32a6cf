//! Error types for part selection

use crate::types::NormalizedType;
use thiserror::Error;

/// Errors that can occur during selection or registration
#[derive(Error, Debug)]
pub enum SelectError {
    /// Content type could not be split into discrete/composite tokens
    #[error("Malformed content type: {0:?}")]
    MalformedContentType(String),

    /// Content type is already bound to a different handler
    #[error("Content type {0} is already registered with a different handler")]
    HandlerConflict(NormalizedType),
}

/// Result type for selection operations
pub type Result<T> = std::result::Result<T, SelectError>;

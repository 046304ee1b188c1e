//! Client error types.

use thiserror::Error;

/// Error raised by the REST collaborator adapter.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response did not match the expected envelope shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The backend answered the envelope with `success: false`.
    #[error("request rejected by backend")]
    Rejected,

    /// Authentication required.
    #[error("authentication required")]
    Unauthorized,

    /// Permission denied.
    #[error("permission denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend refused the request as malformed.
    #[error("request invalid: {0}")]
    BadRequest(String),

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Internal(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

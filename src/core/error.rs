//! Custom error types for the explorer.
//!
//! - [`FetchError`] - Network/fetch-related errors talking to the remote API
//! - [`ExplorerError`] - Errors surfaced by session transitions

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, connection refused, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error {status}: {message}")]
    HttpError { status: u16, message: String },
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
    /// Server answered with `success: false`
    #[error("{0}")]
    Server(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParseError(err.to_string())
    }
}

/// Errors returned by explorer session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplorerError {
    /// Remote call failed; prior state is intact
    #[error(transparent)]
    Remote(#[from] FetchError),
    /// History navigation past either end
    #[error("no further history in that direction")]
    AtBoundary,
    /// Blank command or file name
    #[error("input is empty")]
    EmptyInput,
    /// Batch operation requested with nothing selected
    #[error("no items selected")]
    NothingSelected,
    /// Save requested without an open file
    #[error("no file is open")]
    NoOpenFile,
}

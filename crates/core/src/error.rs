//! Unified error types for marquee.
//!
//! Every variant renders with a stable code prefix so callers can match on it.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the marquee engine, fetcher and server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty HTML).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Markup could not be turned into a usable document tree.
    #[error("PARSE_FAILED: {0}")]
    ParseFailed(String),

    /// Invalid URL or page identifier.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// HTTP error response.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// The source page could not be retrieved; extraction must not run.
    #[error("SOURCE_UNAVAILABLE: {0}")]
    SourceUnavailable(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::ParseFailed(msg) => (-32000, msg.clone()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::FetchTooLarge(msg) => (-32007, msg.clone()),
            Error::HttpError(msg) => (-32008, msg.clone()),
            Error::SourceUnavailable(msg) => (-32013, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

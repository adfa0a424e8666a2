//! Error types for the gateway

use media_http_client::HttpError;
use thiserror::Error;

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur when calling the backend through the gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Session invalid or expired (HTTP 401)
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Error body returned by the backend
        message: String,
    },

    /// Backend returned a non-success status other than 401
    #[error("API error ({status}): {message}")]
    Api {
        /// Error body returned by the backend
        message: String,
        /// HTTP status code
        status: u16,
    },

    /// HTTP request failed (network error, timeout, malformed response)
    #[error("HTTP request failed: {0}")]
    Http(#[from] HttpError),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Custom error message
    #[error("{0}")]
    Custom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_display() {
        let error = Error::Unauthorized {
            message: "session expired".to_string(),
        };
        assert_eq!(format!("{}", error), "Unauthorized: session expired");
    }

    #[test]
    fn test_api_display() {
        let error = Error::Api {
            message: "no permission".to_string(),
            status: 403,
        };
        assert_eq!(format!("{}", error), "API error (403): no permission");
    }

    #[test]
    fn test_from_http_error() {
        let error: Error = HttpError::Timeout.into();
        assert!(matches!(error, Error::Http(HttpError::Timeout)));
    }
}

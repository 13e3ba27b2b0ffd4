//! Error types and result handling.
//!
//! The client has a single transport taxonomy: any non-2xx HTTP outcome maps
//! to [`ClientError::Api`] carrying the status and the server's error message.
//! 4xx and 5xx are not distinguished and nothing is retried. The remaining
//! variants cover connection failures and malformed hypermedia input.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors produced by the Foodpoint client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with a non-success status.
    ///
    /// `message` is taken from the `@error/@message` body field when present,
    /// otherwise from the HTTP status reason phrase.
    #[error("request rejected ({status}): {message}")]
    Api {
        /// HTTP status code of the failed response.
        status: u16,
        /// Human-readable message surfaced to the user.
        message: String,
    },

    /// Connection-level failure before any status was received.
    #[error("http transport error: {0}")]
    Http(String),

    /// A control was asked to drive a form but carries no usable schema.
    #[error("malformed control: {0}")]
    MalformedControl(String),

    /// A response body did not parse as a hypermedia document.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A document does not expose the control the caller tried to follow.
    #[error("document has no '{0}' control")]
    MissingRelation(String),

    /// JSON (de)serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A href did not resolve to a valid URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// The HTTP status behind this error, if it reached the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The text shown in the notification region for this error.
    ///
    /// For [`ClientError::Api`] only the server message is surfaced, matching
    /// the single-field error contract of the API.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ClientError::Api {
            status: 404,
            message: "User not found".to_string(),
        };
        assert_eq!(err.to_string(), "request rejected (404): User not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message(), "User not found");
    }

    #[test]
    fn test_non_api_error_has_no_status() {
        let err = ClientError::Http("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert!(err.user_message().contains("connection refused"));
    }
}

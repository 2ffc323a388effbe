//! Error types for the backend client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when calling the finance backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Backend answered 401: missing, expired or wrong credentials
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Error message from the backend, possibly empty
        message: String,
    },

    /// Backend returned another error status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// `error` or `message` field of the body
        message: String,
        /// Suggested remedy, sent e.g. when a fund is still in use
        action: Option<String>,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Build an error from a failed response's status and body
    ///
    /// JSON bodies contribute their `error` field, else their `message`
    /// field, plus `action` when present. Other bodies are used verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        let (message, action) = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => {
                let field = |name: &str| {
                    value
                        .get(name)
                        .and_then(|v| v.as_str())
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                };
                (
                    field("error").or_else(|| field("message")).unwrap_or_default(),
                    field("action"),
                )
            }
            Err(_) => (body.trim().to_string(), None),
        };

        if status == 401 {
            ClientError::Unauthorized { message }
        } else {
            ClientError::Api {
                status,
                message,
                action,
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Unauthorized { .. } => true,
            Self::Api { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }

    /// Text to show the user: the backend's own message, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Unauthorized { message } | Self::Api { message, .. } if !message.is_empty() => {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }

    /// Remedy hint sent along with the error, if any
    pub fn action(&self) -> Option<&str> {
        match self {
            Self::Api { action, .. } => action.as_deref(),
            _ => None,
        }
    }
}

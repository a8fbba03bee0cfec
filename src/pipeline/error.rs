//! Request error taxonomy
//!
//! Every failure a request can surface is shaped here into a JSON body
//! and a status code at the pipeline boundary, so no handler writes its
//! own error response.

use hyper::StatusCode;
use thiserror::Error;

/// Failures surfaced while processing one request
#[derive(Debug, Error)]
pub enum RequestError {
    /// Malformed request body (JSON or URL-encoded)
    #[error("{0}")]
    BadRequest(String),

    /// Request under the API namespace matched no registered route
    #[error("The requested API endpoint does not exist")]
    ApiNotFound,

    /// Asset directory absent in production: a deployment
    /// misconfiguration surfaced loudly per request
    #[error("The frontend build directory is missing. Please build the client application first.")]
    BuildMissing,

    /// Any other failure inside a route handler
    #[error(transparent)]
    Internal(#[from] std::io::Error),
}

impl RequestError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ApiNotFound => StatusCode::NOT_FOUND,
            Self::BuildMissing | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-visible JSON body
    ///
    /// Internal detail is replaced by a fixed message in production;
    /// development responses carry the underlying error text.
    pub fn body(&self, production: bool) -> serde_json::Value {
        match self {
            Self::BadRequest(message) => serde_json::json!({ "message": message }),
            Self::ApiNotFound => serde_json::json!({
                "error": "Not Found",
                "message": self.to_string(),
            }),
            Self::BuildMissing => serde_json::json!({
                "error": "Frontend build not found",
                "message": self.to_string(),
            }),
            Self::Internal(e) => {
                let message = if production {
                    "Internal Server Error".to_string()
                } else {
                    e.to_string()
                };
                serde_json::json!({ "message": message })
            }
        }
    }

    /// Whether this failure is a client mistake (logged at warn) rather
    /// than a server fault (logged at error)
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::BadRequest(_) | Self::ApiNotFound)
    }
}

//! Error types for master API calls.
//!
//! Every HTTP status the master answers with is mapped onto one variant,
//! so callers match on variants rather than status codes. `NotFound` is
//! the only recoverable variant: the reconciler consumes it as control
//! flow and it never surfaces to the end user.

use thiserror::Error;

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the master API.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP 404 — the resource does not exist.
    #[error("resource not found: {path}")]
    NotFound {
        /// Path that was requested.
        path: String,
    },

    /// HTTP 401 — the bearer token was rejected.
    #[error("authentication failed (401): {message}")]
    Unauthorized {
        /// Message from the server's status document.
        message: String,
    },

    /// HTTP 409 — the resource changed underneath us (stale resourceVersion).
    #[error("conflict (409), cannot update resource: {message}")]
    Conflict {
        /// Message from the server's status document.
        message: String,
    },

    /// HTTP 422 — the server rejected the document.
    #[error("unprocessable entity (422): {message}")]
    Unprocessable {
        /// Message from the server's status document.
        message: String,
    },

    /// HTTP 400 — malformed request.
    #[error("bad request (400): {message}")]
    BadRequest {
        /// Message from the server's status document.
        message: String,
    },

    /// Any other non-2xx status.
    #[error("unexpected HTTP status {status}: {message}")]
    Unexpected {
        /// HTTP status code.
        status: u16,
        /// Message from the server's status document.
        message: String,
    },

    /// Network, DNS, or TLS failure — the master never answered.
    #[error("master unreachable: {message}")]
    Unreachable {
        /// Underlying connection error.
        message: String,
    },

    /// The master answered 2xx with a body that is not valid JSON.
    #[error("invalid API response: {message}")]
    InvalidResponse {
        /// Parse error detail.
        message: String,
    },
}

impl Error {
    /// Whether this error is expected control flow rather than a failure.
    ///
    /// Only `NotFound` qualifies: an absent resource drives the
    /// create/no-op branch of a reconcile pass.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            // Statuses are handled from the response itself; this arm only
            // fires if the agent is configured to raise them.
            ureq::Error::StatusCode(code) => Self::Unexpected {
                status: code,
                message: format!("HTTP {code}"),
            },
            other => Self::Unreachable {
                message: other.to_string(),
            },
        }
    }
}

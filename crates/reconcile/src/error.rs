//! Error types for reconciliation.
//!
//! Errors are tagged with an [`ErrorKind`] so the caller can surface one
//! stable kind string per failure alongside the message. A transport
//! `NotFound` never reaches the caller — the reconciler consumes it as
//! control flow — but its kind exists for completeness.

use thiserror::Error;

/// Result type alias for reconcile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Stable kind tags for every fatal condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required field missing at build time.
    Schema,
    /// The enclosing namespace does not exist.
    NamespaceNotFound,
    /// Resource absent (consumed internally, drives create/no-op).
    NotFound,
    /// Bearer token rejected.
    Unauthorized,
    /// Stale resourceVersion or concurrent modification.
    Conflict,
    /// Document rejected by the server.
    Unprocessable,
    /// Malformed request.
    BadRequest,
    /// Network, DNS, or TLS failure.
    Unreachable,
    /// Anything else the API answered with.
    Api,
}

impl ErrorKind {
    /// Stable tag string for machine-readable output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::NamespaceNotFound => "namespace-not-found",
            Self::NotFound => "not-found",
            Self::Unauthorized => "unauthorized",
            Self::Conflict => "conflict",
            Self::Unprocessable => "unprocessable",
            Self::BadRequest => "bad-request",
            Self::Unreachable => "unreachable",
            Self::Api => "api",
        }
    }

    /// Whether this kind is expected control flow rather than a failure.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur during a reconcile pass.
#[derive(Debug, Error)]
pub enum Error {
    /// A field the schema marks required was not set. Raised before any
    /// network call.
    #[error("required field {field} is not set")]
    Schema {
        /// Name of the missing field.
        field: String,
    },

    /// The resource is absent and so is its enclosing namespace. Distinct
    /// from ordinary absence: creating here would be creating into a
    /// container that does not exist.
    #[error("namespace {namespace} does not exist")]
    NamespaceNotFound {
        /// The namespace that was probed.
        namespace: String,
    },

    /// A transport-level failure, forwarded with its message.
    #[error(transparent)]
    Transport(#[from] transport::Error),
}

impl Error {
    /// Get the kind tag for this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Schema { .. } => ErrorKind::Schema,
            Self::NamespaceNotFound { .. } => ErrorKind::NamespaceNotFound,
            Self::Transport(err) => match err {
                transport::Error::NotFound { .. } => ErrorKind::NotFound,
                transport::Error::Unauthorized { .. } => ErrorKind::Unauthorized,
                transport::Error::Conflict { .. } => ErrorKind::Conflict,
                transport::Error::Unprocessable { .. } => ErrorKind::Unprocessable,
                transport::Error::BadRequest { .. } => ErrorKind::BadRequest,
                transport::Error::Unreachable { .. } => ErrorKind::Unreachable,
                transport::Error::Unexpected { .. } | transport::Error::InvalidResponse { .. } => {
                    ErrorKind::Api
                }
            },
        }
    }
}

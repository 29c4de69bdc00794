//! The `Api` trait — the verb surface the reconciler runs against.

use crate::error::Result;
use serde_json::Value;

/// Authenticated access to the master API, one method per HTTP verb.
///
/// Paths are relative to the configured master URL and include the API
/// group prefix (for example `/oapi/v1/namespaces/ci/buildconfigs/app`).
/// Implementations return the parsed JSON response body on success and an
/// [`Error`](crate::Error) from the closed taxonomy otherwise; a 404 is
/// always reported as [`Error::NotFound`](crate::Error::NotFound) so
/// callers can treat absence as ordinary control flow.
pub trait Api {
    /// Fetch the document at `path`.
    fn get(&self, path: &str) -> Result<Value>;

    /// Create a resource by POSTing `body` to a collection path.
    fn create(&self, path: &str, body: &Value) -> Result<Value>;

    /// Replace the resource at `path` with `body`.
    fn update(&self, path: &str, body: &Value) -> Result<Value>;

    /// Delete the resource at `path`, returning the server's status document.
    fn delete(&self, path: &str) -> Result<Value>;
}

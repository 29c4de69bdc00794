//! HTTP implementation of the [`Api`] trait.
//!
//! One [`ureq::Agent`] is built per [`Client`] from an explicit [`Config`].
//! Statuses are read off the response rather than raised as agent errors,
//! so the status document carried in error bodies can be extracted into
//! the error message.

use crate::api::Api;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use ureq::tls::TlsConfig;
use ureq::{Agent, Body};

/// TLS certificate validation policy.
///
/// There is deliberately no `Default` implementation: the caller decides,
/// visibly, whether the master's certificate is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsPolicy {
    /// Verify the server certificate against the system trust store.
    Verify,
    /// Accept any certificate. Only for masters with self-signed certs.
    InsecureSkipVerify,
}

/// Connection settings for the master API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the master, e.g. `https://master.example.com:8443`.
    pub master_url: String,
    /// Bearer token of the service account used for API calls.
    pub token: String,
    /// Certificate validation policy.
    pub tls: TlsPolicy,
    /// Timeout for establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Overall per-request timeout.
    pub request_timeout: Duration,
}

impl Config {
    /// Create a config with default timeouts (10s connect, 30s request).
    pub fn new(master_url: impl Into<String>, token: impl Into<String>, tls: TlsPolicy) -> Self {
        Self {
            master_url: master_url.into(),
            token: token.into(),
            tls,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Blocking client for the master API.
pub struct Client {
    /// HTTP agent for requests.
    agent: Agent,
    /// Master base URL, without a trailing slash.
    master_url: String,
    /// Pre-formatted `Authorization` header value.
    bearer: String,
}

impl Client {
    /// Build a client from an explicit config.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let tls = TlsConfig::builder()
            .disable_verification(config.tls == TlsPolicy::InsecureSkipVerify)
            .build();
        let agent_config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(config.connect_timeout))
            .timeout_global(Some(config.request_timeout))
            .tls_config(tls)
            .build();

        Self {
            agent: Agent::new_with_config(agent_config),
            master_url: config.master_url.trim_end_matches('/').to_string(),
            bearer: format!("Bearer {}", config.token),
        }
    }

    /// Get the configured master URL.
    #[must_use]
    pub fn master_url(&self) -> &str {
        &self.master_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.master_url, path)
    }

    /// Turn a response into a parsed document or a taxonomy error.
    fn finish(
        &self,
        path: &str,
        result: std::result::Result<ureq::http::Response<Body>, ureq::Error>,
    ) -> Result<Value> {
        let mut response = result.map_err(Error::from)?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|err| Error::Unreachable {
                message: err.to_string(),
            })?;

        if (200..300).contains(&status) {
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(&body).map_err(|err| Error::InvalidResponse {
                message: err.to_string(),
            })
        } else {
            Err(error_for_status(status, path, &body))
        }
    }
}

impl Api for Client {
    fn get(&self, path: &str) -> Result<Value> {
        let result = self
            .agent
            .get(self.url(path))
            .header("Authorization", self.bearer.as_str())
            .call();
        self.finish(path, result)
    }

    fn create(&self, path: &str, body: &Value) -> Result<Value> {
        // send_json sets Content-Type: application/json
        let result = self
            .agent
            .post(self.url(path))
            .header("Authorization", self.bearer.as_str())
            .send_json(body);
        self.finish(path, result)
    }

    fn update(&self, path: &str, body: &Value) -> Result<Value> {
        let result = self
            .agent
            .put(self.url(path))
            .header("Authorization", self.bearer.as_str())
            .send_json(body);
        self.finish(path, result)
    }

    fn delete(&self, path: &str) -> Result<Value> {
        let result = self
            .agent
            .delete(self.url(path))
            .header("Authorization", self.bearer.as_str())
            .call();
        self.finish(path, result)
    }
}

/// Map a non-2xx status and its body onto the error taxonomy.
fn error_for_status(status: u16, path: &str, body: &str) -> Error {
    let message = status_message(body);
    match status {
        404 => Error::NotFound {
            path: path.to_string(),
        },
        401 => Error::Unauthorized { message },
        409 => Error::Conflict { message },
        422 => Error::Unprocessable { message },
        400 => Error::BadRequest { message },
        _ => Error::Unexpected { status, message },
    }
}

/// Extract the human-readable `message` from a v1 Status error body,
/// falling back to the raw body when it is not a status document.
fn status_message(body: &str) -> String {
    let parsed: Option<StatusBody> = serde_json::from_str(body).ok();
    match parsed.and_then(|status| status.message) {
        Some(message) => message,
        None if body.trim().is_empty() => "no response body".to_string(),
        None => body.trim().to_string(),
    }
}

// =============================================================================
// Master API response types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StatusBody {
    message: Option<String>,
}

//! # Reconcile
//!
//! One-pass declarative reconciliation of cluster resources.
//!
//! This crate provides the core shared by every resource kind: build the
//! canonical desired document from a [`Schema`] and caller [`Params`],
//! probe the current state through the [`transport::Api`] trait, and
//! converge — create, update, delete, or do nothing.
//!
//! ## Core Concepts
//!
//! - **Schema**: static description of a resource kind (paths + fields)
//! - **Params**: caller field values; unset means absent, never a sentinel
//! - **Outcome**: the terminal result of a pass, with a changed flag
//! - **Role attachment**: idempotent membership of an identity in a
//!   role binding, reconciled as a nested pass
//!
//! ## Example
//!
//! ```no_run
//! use reconcile::{Field, Intent, Params, Schema, reconcile};
//! use transport::{Client, Config, TlsPolicy};
//!
//! const SERVICE: Schema = Schema {
//!     kind: "Service",
//!     api_base: "/api/v1",
//!     collection: "services",
//!     fields: &[Field { name: "ports", required: false }],
//! };
//!
//! let client = Client::new(Config::new(
//!     "https://master.example.com:8443",
//!     "eyJhbGciOiJSUzI1...",
//!     TlsPolicy::Verify,
//! ));
//! let mut params = Params::new();
//! params.set("ports", serde_json::json!([{ "port": 8080 }]));
//!
//! let outcome = reconcile(&client, &SERVICE, "web", "prod", &params, Intent::Present)?;
//! println!("changed: {}", outcome.is_change());
//! # Ok::<(), reconcile::Error>(())
//! ```

pub mod compliance;
pub mod error;
pub mod reconciler;
pub mod roles;
pub mod schema;

// Re-export main types at crate root
pub use compliance::is_compliant;
pub use error::{Error, ErrorKind, Result};
pub use reconciler::{Intent, Outcome, reconcile};
pub use roles::{attach, service_account_identity};
pub use schema::{Field, Params, Schema, build_document};

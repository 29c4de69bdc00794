//! # Transport
//!
//! Blocking REST client for the OpenShift master API.
//!
//! The crate exposes the [`Api`] trait — plain `get`/`create`/`update`/
//! `delete` verbs over JSON documents — and [`Client`], the HTTP
//! implementation backed by a [`ureq::Agent`]. Every call carries a bearer
//! token; non-2xx statuses are mapped to the closed [`Error`] taxonomy so
//! callers can branch on variants like [`Error::NotFound`] instead of
//! inspecting status codes.
//!
//! TLS verification is an explicit [`TlsPolicy`] on [`Config`] — there is
//! no silent default.
//!
//! ## Example
//!
//! ```no_run
//! use transport::{Api, Client, Config, TlsPolicy};
//!
//! let client = Client::new(Config::new(
//!     "https://master.example.com:8443",
//!     "eyJhbGciOiJSUzI1...",
//!     TlsPolicy::Verify,
//! ));
//! let project = client.get("/oapi/v1/projects/downloader")?;
//! println!("{project}");
//! # Ok::<(), transport::Error>(())
//! ```

pub mod api;
pub mod client;
pub mod error;

pub use api::Api;
pub use client::{Client, Config, TlsPolicy};
pub use error::{Error, Result};

//! Command implementations, one module per resource kind.
//!
//! Every command follows the same shape: collect params from CLI args,
//! pick the static schema, run one reconcile pass, report. The shared
//! plumbing lives here.

pub mod build_config;
pub mod deploy_config;
pub mod service;
pub mod service_account;

use crate::Context;
use crate::cli::{ConnectionArgs, ResourceArgs, State};
use anyhow::Result;
use colored::Colorize;
use reconcile::{Intent, Outcome, Params, Schema};
use std::time::Duration;
use transport::{Client, Config, TlsPolicy};

/// Build the transport client from connection arguments.
pub(crate) fn client(conn: &ConnectionArgs) -> Client {
    let tls = if conn.insecure_skip_tls_verify {
        TlsPolicy::InsecureSkipVerify
    } else {
        TlsPolicy::Verify
    };
    let mut config = Config::new(&conn.master_url, &conn.token, tls);
    config.request_timeout = Duration::from_secs(conn.timeout);
    log::debug!(
        "master {} (verify TLS: {})",
        conn.master_url,
        tls == TlsPolicy::Verify
    );
    Client::new(config)
}

pub(crate) fn intent(state: State) -> Intent {
    match state {
        State::Present => Intent::Present,
        State::Absent => Intent::Absent,
    }
}

/// Run one reconcile pass against a fresh client and report the result.
pub(crate) fn converge(
    ctx: &Context,
    conn: &ConnectionArgs,
    resource: &ResourceArgs,
    schema: &Schema,
    params: &Params,
) -> Result<()> {
    let api = client(conn);
    let outcome = run(&api, resource, schema, params)?;
    report(ctx, schema.kind, &resource.name, &outcome, outcome.is_change());
    Ok(())
}

/// The reconcile pass itself, shared with commands that do more than one
/// step (service accounts also attach roles).
pub(crate) fn run(
    api: &Client,
    resource: &ResourceArgs,
    schema: &Schema,
    params: &Params,
) -> Result<Outcome> {
    log::info!(
        "reconciling {} {}/{}",
        schema.kind,
        resource.namespace,
        resource.name
    );
    reconcile::reconcile(
        api,
        schema,
        &resource.name,
        &resource.namespace,
        params,
        intent(resource.state),
    )
    .map_err(tagged)
}

/// Attach one stable kind tag to a reconcile failure.
pub(crate) fn tagged(err: reconcile::Error) -> anyhow::Error {
    anyhow::anyhow!("[{}] {err}", err.kind())
}

/// Print the outcome: a status line, the changed flag, and the resulting
/// document (when the resource still exists).
pub(crate) fn report(ctx: &Context, kind: &str, name: &str, outcome: &Outcome, changed: bool) {
    if !ctx.quiet {
        let glyph = if changed {
            "→".cyan()
        } else {
            "✓".green()
        };
        println!("{glyph} {kind} {name} {}", outcome.describe());
        println!("changed: {changed}");
    }
    if let Some(resource) = outcome.resource() {
        if let Ok(doc) = serde_json::to_string_pretty(resource) {
            println!("{doc}");
        }
    }
}

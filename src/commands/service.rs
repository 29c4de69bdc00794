//! `converge service` — reconcile a Service.

use crate::Context;
use crate::cli::ServiceArgs;
use crate::commands;
use crate::schemas;
use anyhow::Result;
use reconcile::Params;
use serde_json::{Value, json};

pub fn run(ctx: &Context, args: ServiceArgs) -> Result<()> {
    let mut params = Params::new();
    if let Some(ports) = args.ports {
        params.set("ports", ports);
    }
    if let Some(selector) = args.selector {
        params.set("selector", selector);
    }
    if let Some(cluster_ip) = args.cluster_ip {
        params.set("clusterIP", Value::String(cluster_ip));
    }
    params.set("type", json!(args.service_type.as_value()));
    if let Some(external_ips) = args.external_ips {
        params.set("externalIPs", external_ips);
    }
    params.set("sessionAffinity", json!(args.session_affinity.as_value()));

    commands::converge(
        ctx,
        &args.connection,
        &args.resource,
        &schemas::SERVICE,
        &params,
    )
}

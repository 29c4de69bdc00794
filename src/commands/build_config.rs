//! `converge build-config` — reconcile a BuildConfig.

use crate::Context;
use crate::cli::BuildConfigArgs;
use crate::commands;
use crate::schemas;
use anyhow::Result;
use reconcile::Params;
use serde_json::Value;

pub fn run(ctx: &Context, args: BuildConfigArgs) -> Result<()> {
    let mut params = Params::new();
    if let Some(triggers) = args.triggers {
        params.set("triggers", triggers);
    }
    if let Some(run_policy) = args.run_policy {
        params.set("runPolicy", Value::String(run_policy));
    }
    if let Some(service_account) = args.service_account {
        params.set("serviceAccount", Value::String(service_account));
    }
    if let Some(source) = args.source {
        params.set("source", source);
    }
    if let Some(strategy) = args.strategy {
        params.set("strategy", strategy);
    }
    if let Some(output) = args.output {
        params.set("output", output);
    }
    if let Some(resources) = args.resources {
        params.set("resources", resources);
    }
    if let Some(post_commit) = args.post_commit {
        params.set("postCommit", post_commit);
    }

    commands::converge(
        ctx,
        &args.connection,
        &args.resource,
        &schemas::BUILD_CONFIG,
        &params,
    )
}

//! `converge deploy-config` — reconcile a DeploymentConfig.

use crate::Context;
use crate::cli::DeployConfigArgs;
use crate::commands;
use crate::schemas;
use anyhow::Result;
use reconcile::Params;
use serde_json::json;

pub fn run(ctx: &Context, args: DeployConfigArgs) -> Result<()> {
    let mut params = Params::new();
    if let Some(strategy) = args.strategy {
        params.set("strategy", strategy);
    }
    if let Some(triggers) = args.triggers {
        params.set("triggers", triggers);
    }
    // replicas and test have real defaults; they are always part of the
    // desired spec.
    params.set("replicas", json!(args.replicas));
    params.set("test", json!(args.test));
    if let Some(selector) = args.selector {
        params.set("selector", selector);
    }
    if let Some(template) = args.template {
        params.set("template", template);
    }

    commands::converge(
        ctx,
        &args.connection,
        &args.resource,
        &schemas::DEPLOYMENT_CONFIG,
        &params,
    )
}

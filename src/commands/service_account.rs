//! `converge service-account` — reconcile a ServiceAccount and bind roles.
//!
//! The account itself goes through the ordinary reconcile pass; role
//! attachment then runs as a nested pass. The reported changed flag is
//! the OR of both: an unchanged account can still pick up a new role.

use crate::Context;
use crate::cli::{ServiceAccountArgs, State};
use crate::commands;
use crate::schemas;
use anyhow::Result;
use reconcile::{Params, service_account_identity};

pub fn run(ctx: &Context, args: ServiceAccountArgs) -> Result<()> {
    let api = commands::client(&args.connection);
    let outcome = commands::run(&api, &args.resource, &schemas::SERVICE_ACCOUNT, &Params::new())?;

    let mut changed = outcome.is_change();
    if args.resource.state == State::Present && !args.roles.is_empty() {
        let identity = service_account_identity(&args.resource.namespace, &args.resource.name);
        log::info!("attaching {} role(s) to {identity}", args.roles.len());
        changed |= reconcile::attach(&api, &args.resource.namespace, &identity, &args.roles)
            .map_err(commands::tagged)?;
    }

    commands::report(ctx, "ServiceAccount", &args.resource.name, &outcome, changed);
    Ok(())
}

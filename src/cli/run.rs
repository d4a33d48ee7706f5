//! Deployment run command implementations

use crate::cli::args::GlobalOptions;
use crate::cli::cloudspace::{RunDisplay, finish_batch};
use crate::cli::context::CommandContext;
use crate::client::models::{BatchOutcome, RunOptions, RunProperty};
use crate::client::Cons3rtApi;
use crate::error::{Error, Result};
use crate::output::Formattable;

/// Run the run get command
pub async fn get(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let run = ctx.client.get_run(id).await?;
    vec![RunDisplay::from(run)].print(ctx.format)
}

/// Run the run release command across one or more run ids
pub async fn release(opts: &GlobalOptions, ids: &[u64]) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut outcomes = Vec::new();
    for &dr_id in ids {
        match ctx.client.release_run(dr_id).await {
            Ok(()) => outcomes.push(BatchOutcome::ok(dr_id)),
            Err(err) => outcomes.push(BatchOutcome::fail(dr_id, err.to_string())),
        }
    }
    finish_batch("runs", outcomes, ctx.format)
}

/// Run the run launch command
#[allow(clippy::too_many_arguments)]
pub async fn launch(
    opts: &GlobalOptions,
    deployment_id: u64,
    cloudspace_id: u64,
    name: &str,
    username: Option<&str>,
    end_state: Option<&str>,
    properties: &[String],
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let properties = properties
        .iter()
        .map(|raw| {
            raw.split_once('=')
                .map(|(key, value)| RunProperty {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .ok_or_else(|| {
                    Error::InvalidArgument(format!("property must be key=value, got: {}", raw))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let options = RunOptions {
        virtualization_realm_id: cloudspace_id,
        name: name.to_string(),
        username: username.map(str::to_string),
        end_state: end_state.map(str::to_string),
        properties,
    };

    let run_id = ctx.client.launch_run(deployment_id, &options).await?;
    println!("Launched deployment run: {}", run_id);
    Ok(())
}

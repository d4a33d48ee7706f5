//! Cloudspace command implementations

use log::info;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::args::{GlobalOptions, PaginationArgs, SearchTypeArg, or_dash};
use crate::cli::context::CommandContext;
use crate::client::models::{BatchOutcome, Cloudspace, DeploymentRun};
use crate::client::Cons3rtApi;
use crate::error::{Error, Result};
use crate::output::Formattable;
use crate::runner;

/// Cloudspace display model
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CloudspaceDisplay {
    #[tabled(rename = "CLOUDSPACE ID")]
    pub id: u64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "TYPE")]
    pub cloudspace_type: String,

    #[tabled(rename = "STATE")]
    pub state: String,
}

impl From<Cloudspace> for CloudspaceDisplay {
    fn from(cs: Cloudspace) -> Self {
        Self {
            id: cs.id,
            name: cs.name,
            cloudspace_type: or_dash(cs.cloudspace_type),
            state: or_dash(cs.state),
        }
    }
}

/// Deployment run display model, shared with the run and deployment commands
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RunDisplay {
    #[tabled(rename = "RUN ID")]
    pub id: u64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "CREATOR")]
    pub creator: String,
}

impl From<DeploymentRun> for RunDisplay {
    fn from(run: DeploymentRun) -> Self {
        Self {
            id: run.id,
            name: run.name,
            status: or_dash(run.deployment_run_status),
            creator: or_dash(run.creator),
        }
    }
}

/// Per-id outcome display for batch summaries
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct OutcomeDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "RESULT")]
    pub result: String,

    #[tabled(rename = "MESSAGE")]
    pub message: String,
}

impl From<BatchOutcome> for OutcomeDisplay {
    fn from(outcome: BatchOutcome) -> Self {
        Self {
            id: outcome.id,
            result: outcome.result,
            message: outcome.message,
        }
    }
}

/// Print a batch summary and convert any failure into a nonzero exit.
pub fn finish_batch(what: &str, outcomes: Vec<BatchOutcome>, format: crate::cli::OutputFormat) -> Result<()> {
    let failed = outcomes.iter().filter(|o| o.is_fail()).count();
    let total = outcomes.len();

    let rows: Vec<OutcomeDisplay> = outcomes.into_iter().map(OutcomeDisplay::from).collect();
    rows.print(format)?;

    if failed > 0 {
        return Err(Error::Other(format!(
            "{} of {} {} failed",
            failed, total, what
        )));
    }
    Ok(())
}

/// Run the cloudspace list command
pub async fn list(opts: &GlobalOptions, cloud_id: u64, pagination: &PaginationArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let cloudspaces = ctx
        .client
        .list_cloudspaces(cloud_id, &pagination.to_params())
        .await?;
    let rows: Vec<CloudspaceDisplay> = cloudspaces
        .into_iter()
        .map(CloudspaceDisplay::from)
        .collect();
    rows.print(ctx.format)
}

/// Run the cloudspace get command
pub async fn get(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let cloudspace = ctx.client.get_cloudspace(id).await?;
    vec![CloudspaceDisplay::from(cloudspace)].print(ctx.format)
}

/// Run the cloudspace runs command
pub async fn runs(
    opts: &GlobalOptions,
    id: u64,
    search_type: SearchTypeArg,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let runs = ctx
        .client
        .list_runs_in_cloudspace(id, search_type.into(), &pagination.to_params())
        .await?;
    let rows: Vec<RunDisplay> = runs.into_iter().map(RunDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run the cloudspace release-runs command.
///
/// With `--background` the command re-spawns itself detached and returns
/// immediately; the child shares nothing with this process but its exit
/// status.
pub async fn release_runs(opts: &GlobalOptions, ids: &[u64], background: bool) -> Result<()> {
    if background {
        let mut args = vec![
            "cloudspace".to_string(),
            "release-runs".to_string(),
            "--ids".to_string(),
            ids.iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(","),
        ];
        if let Some(config) = &opts.config {
            args.push("--config".to_string());
            args.push(config.clone());
        }
        if let Some(url) = &opts.url {
            args.push("--url".to_string());
            args.push(url.clone());
        }
        if let Some(project) = &opts.project {
            args.push("--project".to_string());
            args.push(project.clone());
        }

        let pid = runner::respawn_background(&args)?;
        println!("Releasing runs in background process: {}", pid);
        return Ok(());
    }

    let ctx = CommandContext::new(opts)?;
    let mut outcomes = Vec::new();
    for &cloudspace_id in ids {
        info!("Releasing active runs in cloudspace {}", cloudspace_id);
        match ctx.client.release_active_runs(cloudspace_id).await {
            Ok(run_outcomes) if run_outcomes.is_empty() => {
                outcomes.push(BatchOutcome::ok(cloudspace_id));
            }
            Ok(run_outcomes) => outcomes.extend(run_outcomes),
            Err(err) => outcomes.push(BatchOutcome::fail(cloudspace_id, err.to_string())),
        }
    }

    finish_batch("releases", outcomes, ctx.format)
}

/// Run the cloudspace delete-runs command
pub async fn delete_runs(opts: &GlobalOptions, ids: &[u64]) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut outcomes = Vec::new();
    for &cloudspace_id in ids {
        match ctx.client.delete_inactive_runs(cloudspace_id).await {
            Ok(()) => outcomes.push(BatchOutcome::ok(cloudspace_id)),
            Err(err) => outcomes.push(BatchOutcome::fail(cloudspace_id, err.to_string())),
        }
    }

    finish_batch("cloudspaces", outcomes, ctx.format)
}

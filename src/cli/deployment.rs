//! Deployment command implementations

use serde::Serialize;
use tabled::Tabled;

use crate::cli::args::{GlobalOptions, PaginationArgs, or_dash};
use crate::cli::cloudspace::RunDisplay;
use crate::cli::context::CommandContext;
use crate::client::models::Deployment;
use crate::client::Cons3rtApi;
use crate::error::Result;
use crate::output::Formattable;

/// Deployment display model
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DeploymentDisplay {
    #[tabled(rename = "DEPLOYMENT ID")]
    pub id: u64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<Deployment> for DeploymentDisplay {
    fn from(deployment: Deployment) -> Self {
        Self {
            id: deployment.id,
            name: deployment.name,
            description: or_dash(deployment.description),
        }
    }
}

/// Run the deployment list command
pub async fn list(opts: &GlobalOptions, pagination: &PaginationArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let deployments = ctx.client.list_deployments(&pagination.to_params()).await?;
    let rows: Vec<DeploymentDisplay> = deployments
        .into_iter()
        .map(DeploymentDisplay::from)
        .collect();
    rows.print(ctx.format)
}

/// Run the deployment get command
pub async fn get(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let deployment = ctx.client.get_deployment(id).await?;
    vec![DeploymentDisplay::from(deployment)].print(ctx.format)
}

/// Run the deployment runs command
pub async fn runs(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let runs = ctx.client.list_runs_for_deployment(id).await?;
    let rows: Vec<RunDisplay> = runs.into_iter().map(RunDisplay::from).collect();
    rows.print(ctx.format)
}

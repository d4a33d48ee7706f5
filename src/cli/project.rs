//! Project command implementations

use serde::Serialize;
use tabled::Tabled;

use crate::cli::args::{GlobalOptions, PaginationArgs, or_dash};
use crate::cli::context::CommandContext;
use crate::client::models::Project;
use crate::client::Cons3rtApi;
use crate::error::Result;
use crate::output::Formattable;

/// Project display model
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProjectDisplay {
    #[tabled(rename = "PROJECT ID")]
    pub id: u64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<Project> for ProjectDisplay {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: or_dash(project.description),
        }
    }
}

/// Run the project list command
pub async fn list(opts: &GlobalOptions, pagination: &PaginationArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let projects = ctx.client.list_projects(&pagination.to_params()).await?;
    let rows: Vec<ProjectDisplay> = projects.into_iter().map(ProjectDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run the project get command
pub async fn get(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let project = ctx.client.get_project(id).await?;
    vec![ProjectDisplay::from(project)].print(ctx.format)
}

/// Run the project add-user command
pub async fn add_user(opts: &GlobalOptions, id: u64, username: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.client.add_user_to_project(username, id).await?;
    println!("Added {} to project {}", username, id);
    Ok(())
}

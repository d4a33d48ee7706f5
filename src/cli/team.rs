//! Team command implementations

use serde::Serialize;
use tabled::Tabled;

use crate::cli::args::{GlobalOptions, PaginationArgs, or_dash};
use crate::cli::context::CommandContext;
use crate::client::models::Team;
use crate::client::Cons3rtApi;
use crate::error::Result;
use crate::output::Formattable;

/// Team display model
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TeamDisplay {
    #[tabled(rename = "TEAM ID")]
    pub id: u64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "STATE")]
    pub state: String,
}

impl From<Team> for TeamDisplay {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            state: or_dash(team.state),
        }
    }
}

/// Run the team list command
pub async fn list(opts: &GlobalOptions, pagination: &PaginationArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let teams = ctx.client.list_teams(&pagination.to_params()).await?;
    let rows: Vec<TeamDisplay> = teams.into_iter().map(TeamDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run the team get command
pub async fn get(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let team = ctx.client.get_team(id).await?;
    vec![TeamDisplay::from(team)].print(ctx.format)
}

//! Cloud command implementations

use serde::Serialize;
use tabled::Tabled;

use crate::cli::args::{GlobalOptions, PaginationArgs, or_dash};
use crate::cli::context::CommandContext;
use crate::client::models::Cloud;
use crate::client::Cons3rtApi;
use crate::error::Result;
use crate::output::Formattable;

/// Cloud display model for table/JSON/CSV output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CloudDisplay {
    #[tabled(rename = "CLOUD ID")]
    pub id: u64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "TYPE")]
    pub cloud_type: String,

    #[tabled(rename = "STATE")]
    pub state: String,
}

impl From<Cloud> for CloudDisplay {
    fn from(cloud: Cloud) -> Self {
        Self {
            id: cloud.id,
            name: cloud.name,
            cloud_type: or_dash(cloud.cloud_type),
            state: or_dash(cloud.state),
        }
    }
}

/// Run the cloud list command
pub async fn list(opts: &GlobalOptions, pagination: &PaginationArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let clouds = ctx.client.list_clouds(&pagination.to_params()).await?;
    let rows: Vec<CloudDisplay> = clouds.into_iter().map(CloudDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run the cloud get command
pub async fn get(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let cloud = ctx.client.get_cloud(id).await?;
    vec![CloudDisplay::from(cloud)].print(ctx.format)
}

/// Run the cloud register command
pub async fn register(opts: &GlobalOptions, json_path: &std::path::Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let content = std::fs::read_to_string(json_path)?;
    let definition: serde_json::Value = serde_json::from_str(&content)?;

    let cloud_id = ctx.client.register_cloud(definition).await?;
    println!("Registered cloud: {}", cloud_id);
    Ok(())
}

/// Run the cloud delete command
pub async fn delete(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.client.delete_cloud(id).await?;
    println!("Deleted cloud: {}", id);
    Ok(())
}

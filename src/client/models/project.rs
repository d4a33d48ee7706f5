//! Project resource model

use serde::{Deserialize, Serialize};

/// A CONS3RT project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project ID
    pub id: u64,

    /// Project name
    pub name: String,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owning team ID, present in expanded listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
}

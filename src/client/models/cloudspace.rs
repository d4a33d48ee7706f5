//! Cloudspace (virtualization realm) resource model

use serde::{Deserialize, Serialize};

/// A cloudspace: a CONS3RT-managed resource pool within a cloud
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cloudspace {
    /// Cloudspace ID
    pub id: u64,

    /// Cloudspace name
    pub name: String,

    /// Lifecycle state (e.g. ACTIVE, MAINTENANCE)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Realm type
    #[serde(
        default,
        rename = "virtualizationRealmType",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloudspace_type: Option<String>,

    /// Whether remote access is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_access_status: Option<String>,
}

/// Which deployment runs to search for within a cloudspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunSearchType {
    #[default]
    All,
    Active,
    Inactive,
}

impl RunSearchType {
    /// The `search_type` query value the site API expects.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            RunSearchType::All => "SEARCH_ALL",
            RunSearchType::Active => "SEARCH_ACTIVE",
            RunSearchType::Inactive => "SEARCH_INACTIVE",
        }
    }
}

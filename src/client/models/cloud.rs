//! Cloud resource model

use serde::{Deserialize, Serialize};

/// A registered cloud
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cloud {
    /// Cloud ID
    pub id: u64,

    /// Cloud name
    pub name: String,

    /// Cloud type (e.g. AWS, AZURE, VCLOUD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_type: Option<String>,

    /// Lifecycle state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

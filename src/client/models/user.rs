//! User resource model

use serde::{Deserialize, Serialize};

/// A site user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Username (unique per site)
    pub username: String,

    /// User ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// First name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Account state (e.g. ACTIVE, INACTIVE, REQUESTED)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

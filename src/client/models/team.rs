//! Team resource model

use serde::{Deserialize, Serialize};

/// A CONS3RT team
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Team ID
    pub id: u64,

    /// Team name
    pub name: String,

    /// Lifecycle state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Expiration date, epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<i64>,
}

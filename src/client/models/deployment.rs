//! Deployment and deployment run resource models

use serde::{Deserialize, Serialize};

/// A deployment: a launchable composition of systems and scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Deployment ID
    pub id: u64,

    /// Deployment name
    pub name: String,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A deployment run (DR): an instantiated execution of a deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRun {
    /// Run ID
    pub id: u64,

    /// Run name
    pub name: String,

    /// Run status; older sites report this as `fapStatus`
    #[serde(
        default,
        alias = "fapStatus",
        skip_serializing_if = "Option::is_none"
    )]
    pub deployment_run_status: Option<String>,

    /// ID of the deployment this run was launched from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<u64>,

    /// Cloudspace the run lives in
    #[serde(
        default,
        rename = "virtualizationRealmId",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloudspace_id: Option<u64>,

    /// Username of the creator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

/// Options for launching a deployment run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    /// Target cloudspace
    pub virtualization_realm_id: u64,

    /// Name for the new run
    pub name: String,

    /// Username to own the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Desired end state (e.g. TESTS_EXECUTED_RESOURCES_RESERVED)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_state: Option<String>,

    /// Custom deployment properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<RunProperty>,
}

/// One custom property passed to a run launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunProperty {
    pub key: String,
    pub value: String,
}

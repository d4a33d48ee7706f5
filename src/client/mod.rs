//! CONS3RT API client
//!
//! The [`Cons3rtApi`] trait is the endpoint wrapper surface; [`Cons3rtClient`]
//! implements it by composing the transport, the retry wrapper, and the
//! chunked upload helper. Data flows CLI → wrapper → retry → transport →
//! network, and configuration is passed in explicitly — there is no global
//! session state.

use std::path::Path;

use async_trait::async_trait;

pub mod cons3rt;
pub mod models;
pub mod pagination;
pub mod retry;
pub mod transport;
pub mod upload;

pub use cons3rt::Cons3rtClient;
pub use models::{
    AssetCategory, AssetVisibility, BatchOutcome, Cloud, Cloudspace, Deployment, DeploymentRun,
    Project, RunOptions, RunSearchType, Team, User,
};
pub use pagination::{BULK_PAGE_SIZE, DEFAULT_PAGE_SIZE, PageParams, fetch_all};
pub use retry::{RetryPolicy, with_retry};
pub use transport::{ApiConfig, ApiRequest, ApiResponse, Transport};
pub use upload::{ProgressFn, UploadOutcome, UploadSession};

use crate::error::Result;

/// CONS3RT API surface: one method per ReST resource operation.
#[async_trait]
pub trait Cons3rtApi: Send + Sync {
    // ========================================================================
    // Clouds
    // ========================================================================

    /// List clouds, one page
    async fn list_clouds(&self, page: &PageParams) -> Result<Vec<Cloud>>;

    /// Retrieve one cloud's details
    async fn get_cloud(&self, cloud_id: u64) -> Result<Cloud>;

    /// Register a cloud from a JSON definition, returning the new cloud id
    async fn register_cloud(&self, definition: serde_json::Value) -> Result<u64>;

    /// Delete a cloud
    async fn delete_cloud(&self, cloud_id: u64) -> Result<()>;

    // ========================================================================
    // Cloudspaces
    // ========================================================================

    /// List cloudspaces in a cloud, one page
    async fn list_cloudspaces(&self, cloud_id: u64, page: &PageParams) -> Result<Vec<Cloudspace>>;

    /// Retrieve one cloudspace's details
    async fn get_cloudspace(&self, cloudspace_id: u64) -> Result<Cloudspace>;

    /// List deployment runs in a cloudspace, one page
    async fn list_runs_in_cloudspace(
        &self,
        cloudspace_id: u64,
        search_type: RunSearchType,
        page: &PageParams,
    ) -> Result<Vec<DeploymentRun>>;

    /// Delete all inactive runs in a cloudspace
    async fn delete_inactive_runs(&self, cloudspace_id: u64) -> Result<()>;

    // ========================================================================
    // Teams & projects
    // ========================================================================

    /// List teams, one page
    async fn list_teams(&self, page: &PageParams) -> Result<Vec<Team>>;

    /// Retrieve one team's details
    async fn get_team(&self, team_id: u64) -> Result<Team>;

    /// List projects, one page
    async fn list_projects(&self, page: &PageParams) -> Result<Vec<Project>>;

    /// Retrieve one project's details
    async fn get_project(&self, project_id: u64) -> Result<Project>;

    /// Add a user to a project by username
    async fn add_user_to_project(&self, username: &str, project_id: u64) -> Result<()>;

    // ========================================================================
    // Deployments & runs
    // ========================================================================

    /// List deployments, one page
    async fn list_deployments(&self, page: &PageParams) -> Result<Vec<Deployment>>;

    /// Retrieve one deployment's details
    async fn get_deployment(&self, deployment_id: u64) -> Result<Deployment>;

    /// List the runs launched from a deployment
    async fn list_runs_for_deployment(&self, deployment_id: u64) -> Result<Vec<DeploymentRun>>;

    /// Retrieve one deployment run's details
    async fn get_run(&self, dr_id: u64) -> Result<DeploymentRun>;

    /// Launch a deployment run, returning the new run id
    async fn launch_run(&self, deployment_id: u64, options: &RunOptions) -> Result<u64>;

    /// Release a deployment run
    async fn release_run(&self, dr_id: u64) -> Result<()>;

    // ========================================================================
    // Users
    // ========================================================================

    /// List site users, one page
    async fn list_users(&self, page: &PageParams) -> Result<Vec<User>>;

    /// Drain the whole user collection, up to an optional cap
    async fn list_all_users(&self, max_results: Option<usize>) -> Result<Vec<User>>;

    // ========================================================================
    // Assets
    // ========================================================================

    /// Import an asset zip, returning the server-assigned asset id
    async fn import_asset(
        &self,
        zip_path: &Path,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<u64>;

    /// Replace an existing asset's content with a new zip
    async fn update_asset_content(
        &self,
        asset_id: u64,
        zip_path: &Path,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<()>;

    /// Update an asset's lifecycle state
    async fn update_asset_state(
        &self,
        category: AssetCategory,
        asset_id: u64,
        state: &str,
    ) -> Result<()>;

    /// Update an asset's visibility
    async fn update_asset_visibility(
        &self,
        asset_id: u64,
        visibility: AssetVisibility,
    ) -> Result<()>;

    /// Delete an asset
    async fn delete_asset(&self, asset_id: u64) -> Result<()>;
}

//! CONS3RT API client implementation
//!
//! Composes the transport, retry wrapper, and upload helper into the
//! endpoint wrappers of [`Cons3rtApi`]. Wrappers validate identifying
//! arguments before any request is built and parse responses into typed
//! records; a missing expected field fails with a parse error rather than
//! returning partial data.

use std::path::Path;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::client::models::{
    AssetCategory, AssetVisibility, BatchOutcome, Cloud, Cloudspace, Deployment, DeploymentRun,
    Project, RunOptions, RunSearchType, Team, User,
};
use crate::client::pagination::{BULK_PAGE_SIZE, PageParams, fetch_all};
use crate::client::retry::{RetryPolicy, with_retry};
use crate::client::transport::{ApiConfig, ApiRequest, ApiResponse, Transport};
use crate::client::upload::{self, ProgressFn, UploadSession};
use crate::client::Cons3rtApi;
use crate::error::{ApiError, Error, Result};

/// CONS3RT API client
#[derive(Debug)]
pub struct Cons3rtClient {
    transport: Transport,
    policy: RetryPolicy,
}

impl Cons3rtClient {
    /// Create a client from connection settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
            policy: config.retry.clone(),
        })
    }

    /// Execute a request through the retry wrapper.
    async fn call(&self, req: ApiRequest) -> Result<ApiResponse> {
        let response = with_retry(&self.policy, || {
            let req = req.clone();
            async move { self.transport.execute(&req).await }
        })
        .await?;
        Ok(response)
    }

    /// Execute and decode the JSON body into `T`.
    async fn call_json<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T> {
        let response = self.call(req).await?;
        Ok(response.json()?)
    }

    /// Execute and discard the body.
    async fn call_empty(&self, req: ApiRequest) -> Result<()> {
        self.call(req).await.map(|_| ())
    }

    /// Execute and parse a resource id from the body.
    async fn call_id(&self, req: ApiRequest) -> Result<u64> {
        let response = self.call(req).await?;
        upload::parse_resource_id(&response.body).ok_or_else(|| {
            ApiError::Parse(format!(
                "Expected a resource id in the response, got: {}",
                response.body
            ))
            .into()
        })
    }

    fn paged(mut req: ApiRequest, page: &PageParams) -> ApiRequest {
        for (key, value) in page.to_query() {
            req = req.query(key, value);
        }
        req
    }

    fn require_id(what: &str, id: u64) -> Result<()> {
        if id == 0 {
            return Err(Error::InvalidArgument(format!(
                "{} id must be a positive integer",
                what
            )));
        }
        Ok(())
    }

    /// Release every active run in a cloudspace, collecting one outcome per
    /// run instead of aborting on the first failure.
    pub async fn release_active_runs(&self, cloudspace_id: u64) -> Result<Vec<BatchOutcome>> {
        Self::require_id("cloudspace", cloudspace_id)?;

        let runs = fetch_all(BULK_PAGE_SIZE, None, |params| async move {
            self.list_runs_in_cloudspace(cloudspace_id, RunSearchType::Active, &params)
                .await
        })
        .await?;

        let mut outcomes = Vec::with_capacity(runs.len());
        for run in runs {
            match self.release_run(run.id).await {
                Ok(()) => outcomes.push(BatchOutcome::ok(run.id)),
                Err(err) => outcomes.push(BatchOutcome::fail(run.id, err.to_string())),
            }
        }
        Ok(outcomes)
    }
}

#[async_trait]
impl Cons3rtApi for Cons3rtClient {
    async fn list_clouds(&self, page: &PageParams) -> Result<Vec<Cloud>> {
        self.call_json(Self::paged(ApiRequest::get("clouds"), page))
            .await
    }

    async fn get_cloud(&self, cloud_id: u64) -> Result<Cloud> {
        Self::require_id("cloud", cloud_id)?;
        self.call_json(ApiRequest::get(format!("clouds/{}", cloud_id)))
            .await
    }

    async fn register_cloud(&self, definition: serde_json::Value) -> Result<u64> {
        self.call_id(ApiRequest::post("clouds").json(definition))
            .await
    }

    async fn delete_cloud(&self, cloud_id: u64) -> Result<()> {
        Self::require_id("cloud", cloud_id)?;
        self.call_empty(ApiRequest::delete(format!("clouds/{}", cloud_id)))
            .await
    }

    async fn list_cloudspaces(&self, cloud_id: u64, page: &PageParams) -> Result<Vec<Cloudspace>> {
        Self::require_id("cloud", cloud_id)?;
        let req = ApiRequest::get(format!("clouds/{}/virtualizationrealms", cloud_id));
        self.call_json(Self::paged(req, page)).await
    }

    async fn get_cloudspace(&self, cloudspace_id: u64) -> Result<Cloudspace> {
        Self::require_id("cloudspace", cloudspace_id)?;
        self.call_json(ApiRequest::get(format!(
            "virtualizationrealms/{}",
            cloudspace_id
        )))
        .await
    }

    async fn list_runs_in_cloudspace(
        &self,
        cloudspace_id: u64,
        search_type: RunSearchType,
        page: &PageParams,
    ) -> Result<Vec<DeploymentRun>> {
        Self::require_id("cloudspace", cloudspace_id)?;
        let req = ApiRequest::get(format!(
            "virtualizationrealms/{}/deploymentruns",
            cloudspace_id
        ))
        .query("search_type", search_type.as_query_value());
        self.call_json(Self::paged(req, page)).await
    }

    async fn delete_inactive_runs(&self, cloudspace_id: u64) -> Result<()> {
        Self::require_id("cloudspace", cloudspace_id)?;
        self.call_empty(ApiRequest::delete(format!(
            "virtualizationrealms/{}/deploymentruns",
            cloudspace_id
        )))
        .await
    }

    async fn list_teams(&self, page: &PageParams) -> Result<Vec<Team>> {
        self.call_json(Self::paged(ApiRequest::get("teams"), page))
            .await
    }

    async fn get_team(&self, team_id: u64) -> Result<Team> {
        Self::require_id("team", team_id)?;
        self.call_json(ApiRequest::get(format!("teams/{}", team_id)))
            .await
    }

    async fn list_projects(&self, page: &PageParams) -> Result<Vec<Project>> {
        self.call_json(Self::paged(ApiRequest::get("projects"), page))
            .await
    }

    async fn get_project(&self, project_id: u64) -> Result<Project> {
        Self::require_id("project", project_id)?;
        self.call_json(ApiRequest::get(format!("projects/{}", project_id)))
            .await
    }

    async fn add_user_to_project(&self, username: &str, project_id: u64) -> Result<()> {
        Self::require_id("project", project_id)?;
        if username.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "username must not be empty".to_string(),
            ));
        }
        let req = ApiRequest::put(format!("projects/{}/members/", project_id))
            .query("username", username);
        self.call_empty(req).await
    }

    async fn list_deployments(&self, page: &PageParams) -> Result<Vec<Deployment>> {
        self.call_json(Self::paged(ApiRequest::get("deployments"), page))
            .await
    }

    async fn get_deployment(&self, deployment_id: u64) -> Result<Deployment> {
        Self::require_id("deployment", deployment_id)?;
        self.call_json(ApiRequest::get(format!("deployments/{}", deployment_id)))
            .await
    }

    async fn list_runs_for_deployment(&self, deployment_id: u64) -> Result<Vec<DeploymentRun>> {
        Self::require_id("deployment", deployment_id)?;
        self.call_json(ApiRequest::get(format!(
            "deployments/{}/runs",
            deployment_id
        )))
        .await
    }

    async fn get_run(&self, dr_id: u64) -> Result<DeploymentRun> {
        Self::require_id("deployment run", dr_id)?;
        self.call_json(ApiRequest::get(format!("drs/{}", dr_id)))
            .await
    }

    async fn launch_run(&self, deployment_id: u64, options: &RunOptions) -> Result<u64> {
        Self::require_id("deployment", deployment_id)?;
        Self::require_id("cloudspace", options.virtualization_realm_id)?;
        let body = serde_json::to_value(options)?;
        self.call_id(ApiRequest::post(format!("deployments/{}/execute", deployment_id)).json(body))
            .await
    }

    async fn release_run(&self, dr_id: u64) -> Result<()> {
        Self::require_id("deployment run", dr_id)?;
        let req = ApiRequest::put(format!("drs/{}/release", dr_id)).query("force", "true");
        self.call_empty(req).await
    }

    async fn list_users(&self, page: &PageParams) -> Result<Vec<User>> {
        self.call_json(Self::paged(ApiRequest::get("users"), page))
            .await
    }

    async fn list_all_users(&self, max_results: Option<usize>) -> Result<Vec<User>> {
        fetch_all(BULK_PAGE_SIZE, max_results, |params| async move {
            self.list_users(&params).await
        })
        .await
    }

    async fn import_asset(
        &self,
        zip_path: &Path,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<u64> {
        let session = UploadSession::new(&self.transport, &self.policy);
        let outcome = session
            .upload(Method::POST, "import/", zip_path, progress)
            .await?;
        outcome.resource_id.ok_or_else(|| {
            ApiError::Parse("Import response did not include an asset id".to_string()).into()
        })
    }

    async fn update_asset_content(
        &self,
        asset_id: u64,
        zip_path: &Path,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<()> {
        Self::require_id("asset", asset_id)?;
        let session = UploadSession::new(&self.transport, &self.policy);
        session
            .upload(
                Method::PUT,
                &format!("assets/{}/updatecontent/", asset_id),
                zip_path,
                progress,
            )
            .await?;
        Ok(())
    }

    async fn update_asset_state(
        &self,
        category: AssetCategory,
        asset_id: u64,
        state: &str,
    ) -> Result<()> {
        Self::require_id("asset", asset_id)?;
        let req = ApiRequest::put(format!(
            "{}/{}/updatestate",
            category.path_prefix(),
            asset_id
        ))
        .query("state", state);
        self.call_empty(req).await
    }

    async fn update_asset_visibility(
        &self,
        asset_id: u64,
        visibility: AssetVisibility,
    ) -> Result<()> {
        Self::require_id("asset", asset_id)?;
        let req = ApiRequest::put(format!("assets/{}/updatevisibility", asset_id))
            .query("visibility", visibility.as_query_value());
        self.call_empty(req).await
    }

    async fn delete_asset(&self, asset_id: u64) -> Result<()> {
        Self::require_id("asset", asset_id)?;
        self.call_empty(ApiRequest::delete(format!("assets/{}", asset_id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthMode;
    use mockito::Matcher;
    use std::time::Duration;

    fn test_client(server_url: &str) -> Cons3rtClient {
        let config = ApiConfig::new(server_url, AuthMode::Token("tok".to_string()))
            .retry(RetryPolicy::new(2, Duration::ZERO));
        Cons3rtClient::new(&config).unwrap()
    }

    fn users_json(count: usize, offset: usize) -> String {
        let users: Vec<serde_json::Value> = (0..count)
            .map(|i| serde_json::json!({"username": format!("user{}", offset + i)}))
            .collect();
        serde_json::to_string(&users).unwrap()
    }

    #[tokio::test]
    async fn test_list_clouds_sends_page_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/clouds")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("maxresults".into(), "40".into()),
                Matcher::UrlEncoded("page".into(), "0".into()),
            ]))
            .with_status(200)
            .with_body(r#"[{"id": 1, "name": "AWS"}, {"id": 2, "name": "Azure"}]"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let clouds = client.list_clouds(&PageParams::new()).await.unwrap();

        assert_eq!(clouds.len(), 2);
        assert_eq!(clouds[0].name, "AWS");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_zero_id_rejected_without_network() {
        let config = ApiConfig::new(
            "https://unreachable.invalid/rest/api/",
            AuthMode::Token("tok".to_string()),
        );
        let client = Cons3rtClient::new(&config).unwrap();

        let err = client.get_cloud(0).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(err.exit_code(), 64);
    }

    #[tokio::test]
    async fn test_launch_run_parses_run_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/deployments/12/execute")
            .match_body(Matcher::PartialJsonString(
                r#"{"virtualizationRealmId": 5, "name": "smoke"}"#.to_string(),
            ))
            .with_status(202)
            .with_body("8765")
            .create_async()
            .await;

        let client = test_client(&server.url());
        let options = RunOptions {
            virtualization_realm_id: 5,
            name: "smoke".to_string(),
            username: None,
            end_state: None,
            properties: Vec::new(),
        };
        let run_id = client.launch_run(12, &options).await.unwrap();

        assert_eq!(run_id, 8765);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_release_run_target() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/drs/44/release")
            .match_query(Matcher::UrlEncoded("force".into(), "true".into()))
            .with_status(200)
            .create_async()
            .await;

        let client = test_client(&server.url());
        client.release_run(44).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_all_users_concatenates_pages() {
        let mut server = mockito::Server::new_async().await;
        let _page0 = server
            .mock("GET", "/users")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("maxresults".into(), "100".into()),
                Matcher::UrlEncoded("page".into(), "0".into()),
            ]))
            .with_status(200)
            .with_body(users_json(100, 0))
            .create_async()
            .await;
        let _page1 = server
            .mock("GET", "/users")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("maxresults".into(), "100".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(users_json(37, 100))
            .create_async()
            .await;

        let client = test_client(&server.url());
        let users = client.list_all_users(None).await.unwrap();

        assert_eq!(users.len(), 137);
        assert_eq!(users[0].username, "user0");
        assert_eq!(users[136].username, "user136");
    }

    #[tokio::test]
    async fn test_release_active_runs_collects_per_run_outcomes() {
        let mut server = mockito::Server::new_async().await;
        let _runs = server
            .mock("GET", "/virtualizationrealms/9/deploymentruns")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]"#)
            .create_async()
            .await;
        let _release_ok = server
            .mock("PUT", "/drs/1/release")
            .match_query(Matcher::Any)
            .with_status(200)
            .create_async()
            .await;
        let _release_fail = server
            .mock("PUT", "/drs/2/release")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body("run not found")
            .create_async()
            .await;

        let client = test_client(&server.url());
        let outcomes = client.release_active_runs(9).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].is_fail());
        assert!(outcomes[1].is_fail());
        assert!(outcomes[1].message.contains("run not found"));
    }

    #[tokio::test]
    async fn test_parse_error_on_structural_mismatch() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/clouds/3")
            .with_status(200)
            .with_body(r#"{"name": "missing id"}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = client.get_cloud(3).await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Parse(_))));
    }

    #[tokio::test]
    async fn test_transient_server_error_is_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/teams/5")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = client.get_team(5).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Api(ApiError::Exhausted { attempts: 2, .. })
        ));
        mock.assert_async().await;
    }
}

//! GitHub endpoints: repository listing and bulk workflow deployment.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use leakward_core::github::{Credential, RepositoryListing};
use leakward_core::types::{DeployMode, DeploymentResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::local::ResultsResponse;
use super::non_blank;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListReposRequest {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListReposResponse {
    pub success: bool,
    #[serde(flatten)]
    pub listing: RepositoryListing,
}

#[derive(Debug, Deserialize)]
pub struct DeployReposRequest {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub repos: Vec<String>,
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,
}

fn default_dry_run() -> bool {
    true
}

pub async fn list_repositories(
    State(state): State<AppState>,
    payload: Result<Json<ListReposRequest>, JsonRejection>,
) -> ServerResult<Json<ListReposResponse>> {
    let Json(request) = payload?;
    let (Some(token), Some(account)) = (non_blank(request.token), non_blank(request.organization))
    else {
        return Err(ServerError::bad_request("Token and organization required"));
    };

    let listing = state
        .github
        .list_repositories(&Credential::new(token), &account)
        .await?;
    info!(
        account = %account,
        count = listing.count,
        kind = listing.kind.as_str(),
        "listed repositories"
    );

    Ok(Json(ListReposResponse {
        success: true,
        listing,
    }))
}

pub async fn deploy_repositories(
    State(state): State<AppState>,
    payload: Result<Json<DeployReposRequest>, JsonRejection>,
) -> ServerResult<Json<ResultsResponse<DeploymentResult>>> {
    let Json(request) = payload?;
    let token =
        non_blank(request.token).ok_or_else(|| ServerError::bad_request("GitHub token required"))?;

    let mode = DeployMode::from_dry_run(request.dry_run);
    let results = state
        .github
        .deploy_workflow(&Credential::new(token), &request.repos, mode)
        .await;

    let failed = results.iter().filter(|r| !r.success).count();
    info!(
        total = results.len(),
        failed,
        dry_run = mode.is_dry_run(),
        "bulk workflow deployment finished"
    );

    Ok(Json(ResultsResponse { results }))
}

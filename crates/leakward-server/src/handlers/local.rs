//! Local filesystem endpoints: scan, single deploy, bulk deploy.
//!
//! Filesystem work runs on the blocking pool.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use leakward_core::local::ScanResult;
use leakward_core::types::DeploymentResult;
use serde::{Deserialize, Serialize};

use super::non_blank;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PathsRequest {
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SinglePathRequest {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse<T> {
    pub results: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct DeploySingleResponse {
    pub success: bool,
    pub message: String,
    pub files_created: Vec<&'static str>,
}

pub async fn scan_projects(
    State(state): State<AppState>,
    payload: Result<Json<PathsRequest>, JsonRejection>,
) -> ServerResult<Json<ResultsResponse<ScanResult>>> {
    let Json(request) = payload?;
    let local = state.local.clone();
    let results = tokio::task::spawn_blocking(move || local.scan(&request.paths)).await?;
    Ok(Json(ResultsResponse { results }))
}

pub async fn deploy_single(
    State(state): State<AppState>,
    payload: Result<Json<SinglePathRequest>, JsonRejection>,
) -> ServerResult<Json<DeploySingleResponse>> {
    let Json(request) = payload?;
    let path = non_blank(request.path)
        .ok_or_else(|| ServerError::bad_request("Project path required"))?;

    let local = state.local.clone();
    let files_created = tokio::task::spawn_blocking(move || local.deploy(&path)).await??;

    Ok(Json(DeploySingleResponse {
        success: true,
        message: "GitLeaks configuration deployed successfully".to_string(),
        files_created,
    }))
}

pub async fn deploy_bulk(
    State(state): State<AppState>,
    payload: Result<Json<PathsRequest>, JsonRejection>,
) -> ServerResult<Json<ResultsResponse<DeploymentResult>>> {
    let Json(request) = payload?;
    let local = state.local.clone();
    let results = tokio::task::spawn_blocking(move || local.deploy_many(&request.paths)).await?;
    Ok(Json(ResultsResponse { results }))
}

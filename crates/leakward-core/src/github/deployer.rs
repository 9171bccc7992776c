//! Bulk installation of the security workflow into remote repositories.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::client::{Credential, GitHubClient, decode};
use super::model::{ContentEntry, PutContentRequest};
use crate::error::RemoteError;
use crate::templates::{WORKFLOW_DIR, WORKFLOW_PATH};
use crate::types::{DeployMode, DeploymentResult, DeploymentTarget};

/// Commit message used when creating the workflow file.
pub const COMMIT_MESSAGE: &str = "Add GitLeaks security scanning";

/// Substrings that mark an existing workflow as equivalent to ours.
const EXISTING_WORKFLOW_MARKERS: [&str; 2] = ["gitleaks", "security"];

enum RepoOutcome {
    AlreadyPresent,
    Created,
    Rejected(StatusCode),
}

impl RepoOutcome {
    fn into_result(self, target: DeploymentTarget) -> DeploymentResult {
        match self {
            RepoOutcome::AlreadyPresent => {
                DeploymentResult::skipped(target, "Workflow already exists")
            }
            RepoOutcome::Created => DeploymentResult::success(target, "Deployed successfully"),
            RepoOutcome::Rejected(status) => {
                DeploymentResult::failure(target, format!("Failed: {}", status.as_u16()))
            }
        }
    }
}

impl GitHubClient {
    /// Install the workflow into each repository in order.
    ///
    /// Yields exactly one result per input name, in input order. A failure
    /// for one repository is recorded and does not stop the rest.
    pub async fn deploy_workflow(
        &self,
        credential: &Credential,
        repos: &[String],
        mode: DeployMode,
    ) -> Vec<DeploymentResult> {
        let mut results = Vec::with_capacity(repos.len());

        for repo in repos {
            let target = DeploymentTarget::Repo(repo.clone());
            if mode.is_dry_run() {
                results.push(DeploymentResult::dry_run(target, "Would deploy (dry run)"));
                continue;
            }

            let result = match self.deploy_to_repository(credential, repo).await {
                Ok(outcome) => outcome.into_result(target),
                Err(err) => {
                    warn!(repo = %repo, error = %err, "workflow deployment failed");
                    DeploymentResult::failure(target, err.to_string())
                }
            };
            results.push(result);
        }

        results
    }

    async fn deploy_to_repository(
        &self,
        credential: &Credential,
        repo: &str,
    ) -> Result<RepoOutcome, RemoteError> {
        let (owner, name) = split_full_name(repo)?;

        if self.has_security_workflow(credential, owner, name).await? {
            info!(repo, "security workflow already present, skipping");
            return Ok(RepoOutcome::AlreadyPresent);
        }

        let url = self.endpoint(
            ["repos", owner, name, "contents"]
                .into_iter()
                .chain(WORKFLOW_PATH.split('/')),
        );
        let body = PutContentRequest {
            message: COMMIT_MESSAGE,
            content: STANDARD.encode(self.templates().workflow()),
        };

        let response = self.put_json(credential, url, &body).await?;
        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                info!(repo, "workflow created");
                Ok(RepoOutcome::Created)
            }
            status => Ok(RepoOutcome::Rejected(status)),
        }
    }

    /// Whether the workflow directory already holds a matching workflow.
    ///
    /// Any non-200 answer means the directory is absent and creation should
    /// proceed.
    async fn has_security_workflow(
        &self,
        credential: &Credential,
        owner: &str,
        name: &str,
    ) -> Result<bool, RemoteError> {
        let url = self.endpoint(
            ["repos", owner, name, "contents"]
                .into_iter()
                .chain(WORKFLOW_DIR.split('/')),
        );
        let response = self.get(credential, url).await?;
        if response.status() != StatusCode::OK {
            debug!(owner, name, status = response.status().as_u16(), "no workflow directory");
            return Ok(false);
        }

        let entries: Vec<ContentEntry> = decode(response).await?;
        Ok(entries.iter().any(|entry| is_security_workflow(&entry.name)))
    }
}

/// Case-insensitive match against the names we treat as an existing scanner.
pub fn is_security_workflow(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    EXISTING_WORKFLOW_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Split `owner/name` into its two parts.
pub fn split_full_name(full_name: &str) -> Result<(&str, &str), RemoteError> {
    match full_name.trim().split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(RemoteError::InvalidRepository(full_name.to_string())),
    }
}

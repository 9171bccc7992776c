//! Local deployer: scan project directories and write the templates into them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LocalDeployError;
use crate::templates::{TemplateSet, WORKFLOW_DIR};
use crate::types::{DeploymentResult, DeploymentTarget};

/// Readiness of a scanned path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Ready,
    Error,
}

/// Result of inspecting one local path before deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub path: String,
    pub exists: bool,
    pub is_git: bool,
    /// Whether a workflow directory is already present. Absent for missing paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_gitleaks: Option<bool>,
    pub status: ScanStatus,
    pub message: String,
}

/// Writes the template set into directories on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDeployer {
    templates: TemplateSet,
}

impl LocalDeployer {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Inspect each path without modifying anything.
    pub fn scan(&self, paths: &[String]) -> Vec<ScanResult> {
        paths.iter().map(|path| scan_path(path)).collect()
    }

    /// Write all three files into an existing directory.
    ///
    /// Returns the repository-relative names of the files written.
    pub fn deploy(&self, path: &str) -> Result<Vec<&'static str>, LocalDeployError> {
        let root = expand_path(path);
        if !root.exists() {
            return Err(LocalDeployError::NotFound(root));
        }

        let workflows = root.join(WORKFLOW_DIR);
        std::fs::create_dir_all(&workflows).map_err(|source| LocalDeployError::Io {
            path: workflows.clone(),
            source,
        })?;

        let mut created = Vec::with_capacity(3);
        for file in self.templates.files() {
            let target = root.join(file.path);
            std::fs::write(&target, file.contents).map_err(|source| LocalDeployError::Io {
                path: target.clone(),
                source,
            })?;
            created.push(file.path);
        }

        debug!(path = %root.display(), "deployed templates");
        Ok(created)
    }

    /// Deploy to every path, isolating failures per path.
    pub fn deploy_many(&self, paths: &[String]) -> Vec<DeploymentResult> {
        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            let target = DeploymentTarget::Path(path.clone());
            let result = match self.deploy(path) {
                Ok(_) => DeploymentResult::success(target, "Deployed successfully"),
                Err(err) => {
                    warn!(path = %path, error = %err, "local deployment failed");
                    DeploymentResult::failure(target, err.to_string())
                }
            };
            results.push(result);
        }
        results
    }
}

impl Default for LocalDeployer {
    fn default() -> Self {
        Self::new(TemplateSet::builtin())
    }
}

fn scan_path(path: &str) -> ScanResult {
    let root = expand_path(path);
    if !root.exists() {
        return ScanResult {
            path: path.to_string(),
            exists: false,
            is_git: false,
            has_gitleaks: None,
            status: ScanStatus::Error,
            message: "Path does not exist".to_string(),
        };
    }

    let is_git = root.join(".git").exists();
    let has_workflows = root.join(WORKFLOW_DIR).exists();
    let (status, message) = if is_git {
        (ScanStatus::Ready, "Ready for deployment")
    } else {
        (ScanStatus::Error, "Not a git repository")
    };

    ScanResult {
        path: path.to_string(),
        exists: true,
        is_git,
        has_gitleaks: Some(has_workflows),
        status,
        message: message.to_string(),
    }
}

/// Trim surrounding whitespace and expand a leading `~` to the home directory.
pub fn expand_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    match dirs::home_dir() {
        Some(home) => expand_with_home(trimmed, &home),
        None => PathBuf::from(trimmed),
    }
}

fn expand_with_home(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

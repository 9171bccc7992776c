//! Shared result types used by the local and remote deployers.

use serde::{Deserialize, Serialize};

/// Where a deployment was aimed.
///
/// Serialized as a single `"path"` or `"repo"` key next to the result fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentTarget {
    /// Local filesystem path, as supplied by the caller.
    Path(String),
    /// Remote repository full name (`owner/name`).
    Repo(String),
}

impl DeploymentTarget {
    pub fn as_str(&self) -> &str {
        match self {
            DeploymentTarget::Path(path) => path,
            DeploymentTarget::Repo(repo) => repo,
        }
    }
}

/// Outcome of one deployment attempt against one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentResult {
    #[serde(flatten)]
    pub target: DeploymentTarget,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub skipped: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dry_run: bool,
}

impl DeploymentResult {
    pub fn success(target: DeploymentTarget, message: impl Into<String>) -> Self {
        Self {
            target,
            success: true,
            message: message.into(),
            skipped: false,
            dry_run: false,
        }
    }

    pub fn failure(target: DeploymentTarget, message: impl Into<String>) -> Self {
        Self {
            target,
            success: false,
            message: message.into(),
            skipped: false,
            dry_run: false,
        }
    }

    /// Target already carries a matching configuration; nothing was written.
    pub fn skipped(target: DeploymentTarget, message: impl Into<String>) -> Self {
        Self {
            skipped: true,
            ..Self::success(target, message)
        }
    }

    pub fn dry_run(target: DeploymentTarget, message: impl Into<String>) -> Self {
        Self {
            dry_run: true,
            ..Self::success(target, message)
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Whether a bulk deployment issues writes or only previews them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeployMode {
    /// Record what would happen without any network call.
    #[default]
    DryRun,
    Apply,
}

impl DeployMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            DeployMode::DryRun
        } else {
            DeployMode::Apply
        }
    }

    pub fn is_dry_run(self) -> bool {
        matches!(self, DeployMode::DryRun)
    }
}

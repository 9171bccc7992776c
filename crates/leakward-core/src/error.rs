//! Error taxonomy for deployment operations.
//!
//! Remote failures are split by origin so callers can tell a transport
//! problem from an upstream rejection or an unreadable payload.

use std::path::PathBuf;

/// Failure talking to the hosting API.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("{0}")]
    Network(#[source] reqwest::Error),

    #[error("GitHub API error: {status}. {hint}")]
    Status { status: u16, hint: &'static str },

    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid repository name '{0}': expected owner/name")]
    InvalidRepository(String),
}

impl RemoteError {
    /// Upstream status code, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure writing templates into a local path.
#[derive(Debug, thiserror::Error)]
pub enum LocalDeployError {
    #[error("Project path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

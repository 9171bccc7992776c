//! Wire and domain types for the GitHub API.

use serde::{Deserialize, Serialize};

/// Which kind of account owns a set of repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Organization,
    User,
}

impl AccountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountKind::Organization => "organization",
            AccountKind::User => "user",
        }
    }
}

/// Snapshot of a remote repository as returned by a listing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    pub full_name: String,
    pub default_branch: String,
    pub private: bool,
    pub updated_at: String,
}

/// Every repository owned by one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryListing {
    pub repos: Vec<RepositoryDescriptor>,
    pub count: usize,
    #[serde(rename = "type")]
    pub kind: AccountKind,
}

impl RepositoryListing {
    pub fn new(kind: AccountKind, repos: Vec<RepositoryDescriptor>) -> Self {
        Self {
            count: repos.len(),
            repos,
            kind,
        }
    }
}

/// Repository object as sent by GitHub; only the projected fields are read.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRepository {
    name: String,
    full_name: String,
    #[serde(default)]
    default_branch: Option<String>,
    private: bool,
    updated_at: String,
}

impl From<RawRepository> for RepositoryDescriptor {
    fn from(raw: RawRepository) -> Self {
        Self {
            name: raw.name,
            full_name: raw.full_name,
            default_branch: raw.default_branch.unwrap_or_else(|| "main".to_string()),
            private: raw.private,
            updated_at: raw.updated_at,
        }
    }
}

/// Entry of a contents directory listing.
#[derive(Debug, Deserialize)]
pub(crate) struct ContentEntry {
    pub name: String,
}

/// Body of a create-or-update file request.
#[derive(Debug, Serialize)]
pub(crate) struct PutContentRequest<'a> {
    pub message: &'a str,
    /// Base64-encoded file body.
    pub content: String,
}

//! Leakward Core Library
//!
//! Deploys GitLeaks secret-scanning configuration into repositories on
//! local disk or on GitHub, and builds downloadable bundles of the same
//! configuration.

pub mod bundle;
pub mod config;
pub mod error;
pub mod github;
pub mod local;
pub mod templates;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigStore, GitHubSettings, LeakwardConfig, ServerSettings};

    // Errors
    pub use crate::error::{LocalDeployError, RemoteError};

    // GitHub
    pub use crate::github::{
        AccountKind, Credential, GitHubClient, RepositoryDescriptor, RepositoryListing,
    };

    // Local
    pub use crate::local::{LocalDeployer, ScanResult, ScanStatus};

    // Bundles
    pub use crate::bundle::ScriptFlavor;

    // Shared
    pub use crate::templates::TemplateSet;
    pub use crate::types::{DeployMode, DeploymentResult, DeploymentTarget};
}

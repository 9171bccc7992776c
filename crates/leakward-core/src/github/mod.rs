//! GitHub integration: repository discovery and workflow deployment.
//!
//! All calls go through [`GitHubClient`], which carries the configured API
//! base URL and a reusable HTTP client. Requests are issued one at a time.

pub mod client;
pub mod deployer;
pub mod lister;
pub mod model;

pub use client::{Credential, GitHubClient};
pub use deployer::{COMMIT_MESSAGE, is_security_workflow, split_full_name};
pub use lister::{ListingEndpoint, ORGANIZATION_ENDPOINT, PAGE_SIZE, USER_ENDPOINT};
pub use model::{AccountKind, RepositoryDescriptor, RepositoryListing};

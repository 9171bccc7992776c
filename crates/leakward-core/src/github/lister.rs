//! Paginated repository discovery with organization-to-user fallback.

use reqwest::StatusCode;
use tracing::{debug, info};
use url::Url;

use super::client::{Credential, GitHubClient, decode};
use super::model::{AccountKind, RawRepository, RepositoryDescriptor, RepositoryListing};
use crate::error::RemoteError;

/// Items requested per page; a shorter page is the last one.
pub const PAGE_SIZE: usize = 100;

/// One shape of the "list repositories for an account" endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingEndpoint {
    pub kind: AccountKind,
    /// Leading path segment (`orgs` or `users`).
    pub segment: &'static str,
    /// Appended to status errors to point the caller at the likely cause.
    pub hint: &'static str,
}

pub const ORGANIZATION_ENDPOINT: ListingEndpoint = ListingEndpoint {
    kind: AccountKind::Organization,
    segment: "orgs",
    hint: "Check if org name is correct and token has proper permissions.",
};

pub const USER_ENDPOINT: ListingEndpoint = ListingEndpoint {
    kind: AccountKind::User,
    segment: "users",
    hint: "Check if username/org is correct and token is valid.",
};

impl ListingEndpoint {
    /// `{api}/{segment}/{account}/repos?page={page}&per_page=100`
    pub fn page_url(&self, client: &GitHubClient, account: &str, page: u32) -> Url {
        let mut url = client.endpoint([self.segment, account, "repos"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &PAGE_SIZE.to_string());
        url
    }
}

impl GitHubClient {
    /// List every repository owned by `account`.
    ///
    /// The organization endpoint is tried first. A 404 on its first page
    /// switches to the user endpoint once; any other non-success status, on
    /// any page of either endpoint, ends the listing with an error.
    pub async fn list_repositories(
        &self,
        credential: &Credential,
        account: &str,
    ) -> Result<RepositoryListing, RemoteError> {
        let mut endpoint = ORGANIZATION_ENDPOINT;
        let mut repos = Vec::new();
        let mut page: u32 = 1;

        loop {
            let response = self
                .get(credential, endpoint.page_url(self, account, page))
                .await?;
            let status = response.status();

            if status == StatusCode::NOT_FOUND && page == 1 && endpoint == ORGANIZATION_ENDPOINT {
                info!(account, "not an organization, listing as user");
                endpoint = USER_ENDPOINT;
                continue;
            }
            if !status.is_success() {
                return Err(RemoteError::Status {
                    status: status.as_u16(),
                    hint: endpoint.hint,
                });
            }

            let batch: Vec<RawRepository> = decode(response).await?;
            let fetched = batch.len();
            repos.extend(batch.into_iter().map(RepositoryDescriptor::from));
            debug!(account, page, fetched, kind = endpoint.kind.as_str(), "fetched page");

            if fetched < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(RepositoryListing::new(endpoint.kind, repos))
    }
}

//! Authenticated HTTP access to the GitHub REST API.

use std::fmt;
use std::time::Duration;

use anyhow::Context;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::GitHubSettings;
use crate::error::RemoteError;
use crate::templates::TemplateSet;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Caller-supplied API token, forwarded as a bearer credential.
///
/// Never persisted, and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

/// GitHub REST client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: Url,
    templates: TemplateSet,
}

impl GitHubClient {
    pub fn new(settings: &GitHubSettings, templates: TemplateSet) -> anyhow::Result<Self> {
        settings.validate()?;
        let api_base = settings.api_base()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        let mut builder = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .default_headers(headers);
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_base,
            templates,
        })
    }

    /// Client with default settings pointed at `api_url`.
    pub fn with_api_url(api_url: impl Into<String>) -> anyhow::Result<Self> {
        let settings = GitHubSettings {
            api_url: api_url.into(),
            ..GitHubSettings::default()
        };
        Self::new(&settings, TemplateSet::builtin())
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// API base with `segments` appended, each percent-encoded.
    pub fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.api_base.clone();
        // Bases are validated as http(s) URLs, which always have a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) async fn get(
        &self,
        credential: &Credential,
        url: Url,
    ) -> Result<reqwest::Response, RemoteError> {
        self.http
            .get(url)
            .bearer_auth(credential.expose())
            .send()
            .await
            .map_err(RemoteError::Network)
    }

    pub(crate) async fn put_json<T: Serialize + ?Sized>(
        &self,
        credential: &Credential,
        url: Url,
        body: &T,
    ) -> Result<reqwest::Response, RemoteError> {
        self.http
            .put(url)
            .bearer_auth(credential.expose())
            .json(body)
            .send()
            .await
            .map_err(RemoteError::Network)
    }
}

/// Read a JSON body, keeping the request URL for diagnostics.
pub(crate) async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, RemoteError> {
    let url = response.url().to_string();
    response
        .json()
        .await
        .map_err(|source| RemoteError::Decode { url, source })
}

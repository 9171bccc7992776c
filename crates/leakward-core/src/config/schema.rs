//! Schema for `leakward.toml`.

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default GitHub REST endpoint.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeakwardConfig {
    pub server: ServerSettings,
    pub github: GitHubSettings,
}

impl LeakwardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check values serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.github.validate()
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    /// Allow any origin, so the browser control panel can call the API.
    pub cors: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 5000)),
            cors: true,
        }
    }
}

/// Outbound hosting API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    pub api_url: String,
    pub user_agent: String,
    /// Per-request timeout. Unset means requests wait indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
            user_agent: concat!("leakward/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

impl GitHubSettings {
    /// Parsed `api_url`.
    pub fn api_base(&self) -> Result<Url> {
        let url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid github.api_url: {}", self.api_url))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            anyhow::bail!(
                "Invalid github.api_url: {} (expected an http(s) base URL)",
                self.api_url
            );
        }
        Ok(url)
    }

    pub fn validate(&self) -> Result<()> {
        self.api_base()?;
        if self.user_agent.trim().is_empty() {
            anyhow::bail!("github.user_agent must not be empty");
        }
        if self.timeout_secs == Some(0) {
            anyhow::bail!("github.timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

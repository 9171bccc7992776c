//! Shared application state.

use leakward_core::config::LeakwardConfig;
use leakward_core::github::GitHubClient;
use leakward_core::local::LocalDeployer;
use leakward_core::templates::TemplateSet;

/// Collaborators shared by every handler. Immutable after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub templates: TemplateSet,
    pub local: LocalDeployer,
    pub github: GitHubClient,
}

impl AppState {
    pub fn new(config: &LeakwardConfig) -> anyhow::Result<Self> {
        let templates = TemplateSet::builtin();
        let github = GitHubClient::new(&config.github, templates.clone())?;
        Ok(Self::from_parts(templates, github))
    }

    pub fn from_parts(templates: TemplateSet, github: GitHubClient) -> Self {
        Self {
            local: LocalDeployer::new(templates.clone()),
            templates,
            github,
        }
    }
}

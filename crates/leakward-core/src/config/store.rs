//! Config store for loading and saving leakward.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use super::{LeakwardConfig, parser, paths};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
    /// Explicitly requested files must exist; the default location may not.
    required: bool,
}

impl ConfigStore {
    /// Store backed by the per-user default location.
    pub fn from_default_location() -> anyhow::Result<Self> {
        let config_path = paths::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(Self::optional(config_path))
    }

    /// Store backed by a file that may be absent.
    pub fn optional(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            required: false,
        }
    }

    /// Store backed by a file the caller named explicitly.
    pub fn from_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            required: true,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> anyhow::Result<LeakwardConfig> {
        if !self.required && !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(LeakwardConfig::new());
        }
        parser::parse_config(&self.config_path)
    }

    /// Write the default configuration. An existing file is kept unless
    /// `overwrite` is set.
    pub fn init(&self, overwrite: bool) -> anyhow::Result<LeakwardConfig> {
        if self.config_path.exists() && !overwrite {
            anyhow::bail!("Config file already exists: {}", self.config_path.display());
        }
        let config = LeakwardConfig::new();
        self.save(&config)?;
        Ok(config)
    }

    pub fn save(&self, config: &LeakwardConfig) -> anyhow::Result<()> {
        let content = parser::to_toml(config).context("Failed to serialize config to TOML")?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }
}

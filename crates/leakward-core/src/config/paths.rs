//! Config path resolution helpers.

use std::path::{Path, PathBuf};

/// File name looked up inside the config directory.
pub const CONFIG_FILE_NAME: &str = "leakward.toml";

/// `<config_dir>/leakward/leakward.toml`
pub fn config_path_in(config_dir: &Path) -> PathBuf {
    config_dir.join("leakward").join(CONFIG_FILE_NAME)
}

/// Default config location for the current user, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| config_path_in(&dir))
}

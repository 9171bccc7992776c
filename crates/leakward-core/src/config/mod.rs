//! Server configuration loaded from `leakward.toml`.
//!
//! Every field has a default, so a missing file or an empty document yields
//! a working configuration.

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use parser::{parse_config, parse_config_str, to_toml};
pub use paths::{CONFIG_FILE_NAME, config_path_in, default_config_path};
pub use schema::{DEFAULT_GITHUB_API_URL, GitHubSettings, LeakwardConfig, ServerSettings};
pub use store::ConfigStore;

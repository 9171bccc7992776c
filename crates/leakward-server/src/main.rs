//! Leakward - GitLeaks deployment server
//!
//! Usage:
//!   leakward                    # Serve the HTTP API (default)
//!   leakward serve --bind ...   # Serve with overrides
//!   leakward bundle [FILE]      # Write the config archive
//!   leakward script [FILE]      # Write the standalone deployment script
//!   leakward config init        # Write a default leakward.toml

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leakward_core::bundle::{self, ARCHIVE_FILE_NAME, SCRIPT_FILE_NAME, ScriptFlavor};
use leakward_core::config::{ConfigStore, LeakwardConfig, to_toml};
use leakward_core::templates::TemplateSet;
use leakward_server::Server;

#[derive(Parser)]
#[command(name = "leakward")]
#[command(about = "Deploy GitLeaks configuration to local and GitHub repositories", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve(ServeArgs),

    /// Write the configuration archive to a file
    Bundle {
        /// Output path
        #[arg(default_value = ARCHIVE_FILE_NAME)]
        output: PathBuf,
    },

    /// Write the standalone deployment script to a file
    Script {
        /// Script flavor
        #[arg(long = "type", default_value = "bash")]
        flavor: String,

        /// Output path
        #[arg(default_value = SCRIPT_FILE_NAME)]
        output: PathBuf,
    },

    /// Manage the configuration file
    Config(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Write the default configuration
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Bind address, overriding server.bind
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// GitHub API base URL, overriding github.api_url
    #[arg(long)]
    github_api_url: Option<String>,

    /// Disable permissive CORS headers
    #[arg(long)]
    no_cors: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leakward=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => run_serve(cli.config.as_deref(), ServeArgs::default()).await?,
        Some(Commands::Serve(args)) => run_serve(cli.config.as_deref(), args).await?,
        Some(Commands::Bundle { output }) => run_bundle(&output)?,
        Some(Commands::Script { flavor, output }) => run_script(&flavor, &output)?,
        Some(Commands::Config(args)) => run_config(cli.config.as_deref(), args)?,
    }

    Ok(())
}

fn config_store(path: Option<&Path>) -> Result<ConfigStore> {
    match path {
        Some(path) => Ok(ConfigStore::from_path(path)),
        None => ConfigStore::from_default_location(),
    }
}

fn load_config(path: Option<&Path>) -> Result<LeakwardConfig> {
    let store = config_store(path)?;
    tracing::debug!(path = %store.config_path().display(), "loading config");
    store.load()
}

async fn run_serve(config_path: Option<&Path>, args: ServeArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(api_url) = args.github_api_url {
        config.github.api_url = api_url;
    }
    if args.no_cors {
        config.server.cors = false;
    }
    config.validate()?;

    let server = Server::new(&config)?;
    tracing::info!(
        bind = %server.addr(),
        github = %config.github.api_url,
        "Starting GitLeaks deployment API"
    );
    server.run().await
}

fn run_config(config_path: Option<&Path>, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigSubcommand::Init { force } => {
            let store = config_store(config_path)?;
            store.init(force)?;
            println!("Wrote {}", store.config_path().display());
        }
        ConfigSubcommand::Show => {
            let config = load_config(config_path)?;
            print!("{}", to_toml(&config)?);
        }
    }
    Ok(())
}

fn run_bundle(output: &Path) -> Result<()> {
    let archive = bundle::config_archive(&TemplateSet::builtin())?;
    std::fs::write(output, archive)
        .with_context(|| format!("Failed to write archive: {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn run_script(flavor: &str, output: &Path) -> Result<()> {
    let flavor: ScriptFlavor = flavor.parse()?;
    let script = bundle::deploy_script(&TemplateSet::builtin(), flavor);
    std::fs::write(output, script)
        .with_context(|| format!("Failed to write script: {}", output.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(output, std::fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to mark script executable: {}", output.display()))?;
    }

    println!("Wrote {}", output.display());
    Ok(())
}

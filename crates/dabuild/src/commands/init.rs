//! Initialize command.

use std::fs;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::info;

use dabuild_config::{CONFIG_FILE_NAME, Config};

use super::GlobalArgs;

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Remote to track instead of origin
    #[arg(long)]
    pub remote: Option<String>,
}

/// Runs the init command.
pub fn run(global: &GlobalArgs, args: &InitArgs) -> Result<()> {
    let path = global.root()?.join(CONFIG_FILE_NAME);
    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let mut config = Config::default();
    if let Some(remote) = &args.remote {
        config.git.remote.clone_from(remote);
    }
    config.validate()?;

    fs::write(&path, config.to_toml()?)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "wrote configuration");
    println!("Created {}", path.display());
    Ok(())
}

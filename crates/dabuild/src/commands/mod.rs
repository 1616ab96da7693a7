//! Subcommand implementations.

pub mod file;
pub mod init;
pub mod refs;
pub mod rev;
pub mod tarball;
pub mod tree;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use dabuild_config::{Config, ConfigError, find_and_load_config_from, load_config};
use dabuild_git::Repository;

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    /// Working tree path as given on the command line.
    pub repo: PathBuf,

    /// Explicit configuration file, if any.
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// Returns the working tree as an absolute path.
    pub fn root(&self) -> Result<PathBuf> {
        self.repo
            .canonicalize()
            .with_context(|| format!("working tree not found: {}", self.repo.display()))
    }

    /// Loads the configuration, falling back to defaults when no file exists.
    pub fn load_config(&self) -> Result<Config> {
        if let Some(path) = &self.config {
            return load_config(path)
                .with_context(|| format!("failed to load {}", path.display()));
        }

        match find_and_load_config_from(self.root()?) {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(_)) => {
                debug!("no configuration file found, using defaults");
                Ok(Config::default())
            }
            Err(e) => Err(e).context("failed to load configuration"),
        }
    }

    /// Opens the working tree with the configured remote and programs.
    pub fn open_repository(&self) -> Result<Repository> {
        let config = self.load_config()?;
        let root = self.root()?;
        debug!(?root, remote = %config.git.remote, "opening repository");

        Ok(Repository::new(root)
            .with_remote(config.git.remote)
            .with_git_program(config.git.program)
            .with_pristine_tar_program(config.pristine_tar.program))
    }
}

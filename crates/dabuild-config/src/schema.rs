//! Configuration schema.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Git configuration.
    #[serde(default)]
    pub git: GitConfig,

    /// pristine-tar configuration.
    #[serde(default)]
    pub pristine_tar: PristineTarConfig,
}

impl Config {
    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.git.program.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "git.program must not be empty".to_string(),
            ));
        }
        if self.git.remote.is_empty() {
            return Err(ConfigError::Invalid(
                "git.remote must not be empty".to_string(),
            ));
        }
        if self.git.remote.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!(
                "git.remote must not contain whitespace: {:?}",
                self.git.remote
            )));
        }
        if self.pristine_tar.program.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "pristine_tar.program must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }
}

/// Git configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitConfig {
    /// Executable used for every git invocation.
    #[serde(default = "default_git_program")]
    pub program: String,

    /// Remote whose branches are tracked.
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: default_git_program(),
            remote: default_remote(),
        }
    }
}

fn default_git_program() -> String {
    "git".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// pristine-tar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PristineTarConfig {
    /// Executable used to import and export tarballs.
    #[serde(default = "default_pristine_tar_program")]
    pub program: String,
}

impl Default for PristineTarConfig {
    fn default() -> Self {
        Self {
            program: default_pristine_tar_program(),
        }
    }
}

fn default_pristine_tar_program() -> String {
    "pristine-tar".to_string()
}

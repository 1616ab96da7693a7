//! File lookup commands.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;

use super::GlobalArgs;

/// Arguments for the cat command.
#[derive(Debug, Args)]
pub struct CatArgs {
    /// Revision to read from
    pub rev: String,

    /// Path relative to the repository root
    pub path: String,
}

/// Arguments for the exists command.
#[derive(Debug, Args)]
pub struct ExistsArgs {
    /// Revision to look in
    pub rev: String,

    /// Path relative to the repository root
    pub path: String,
}

/// Writes the file's bytes to stdout unchanged.
pub fn run_cat(global: &GlobalArgs, args: &CatArgs) -> Result<()> {
    let repo = global.open_repository()?;
    let contents = repo.get_rev(&args.rev)?.read_file(&args.path)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&contents)
        .and_then(|()| stdout.flush())
        .context("failed to write to stdout")
}

/// Prints `true` or `false`.
pub fn run_exists(global: &GlobalArgs, args: &ExistsArgs) -> Result<()> {
    let repo = global.open_repository()?;
    let exists = repo.get_rev(&args.rev)?.file_exists(&args.path)?;
    println!("{exists}");
    Ok(())
}

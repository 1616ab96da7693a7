//! pristine-tar passthrough commands.

use std::path::{self, Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use super::GlobalArgs;

/// Arguments for the import-tarball command.
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Upstream tarball to record
    pub file: PathBuf,

    /// Revision holding the unpacked upstream sources
    pub rev: String,
}

/// Arguments for the export-tarball command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Tarball to regenerate
    pub file: PathBuf,
}

// pristine-tar runs inside the working tree, so relative paths must be
// resolved against the caller's directory first.
fn absolute(file: &Path) -> Result<PathBuf> {
    path::absolute(file).with_context(|| format!("invalid path: {}", file.display()))
}

/// Records a tarball against a revision.
pub fn run_import(global: &GlobalArgs, args: &ImportArgs) -> Result<()> {
    let repo = global.open_repository()?;
    let file = absolute(&args.file)?;
    repo.import_tarball(&file, &args.rev)?;
    Ok(())
}

/// Regenerates a tarball from the repository.
pub fn run_export(global: &GlobalArgs, args: &ExportArgs) -> Result<()> {
    let repo = global.open_repository()?;
    let file = absolute(&args.file)?;
    repo.export_tarball(&file)?;
    Ok(())
}

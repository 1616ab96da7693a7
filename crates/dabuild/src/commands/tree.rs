//! Working tree commands. All of these discard local changes.

use anyhow::Result;
use clap::Args;

use super::GlobalArgs;

/// Arguments for the checkout command.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Revision to check out (detached)
    pub rev: String,
}

/// Arguments for the remote-checkout command.
#[derive(Debug, Args)]
pub struct RemoteCheckoutArgs {
    /// Branch to reset to its remote counterpart
    pub branch: String,
}

/// Cleans the working tree.
pub fn run_clean(global: &GlobalArgs) -> Result<()> {
    let repo = global.open_repository()?;
    repo.clean()?;
    Ok(())
}

/// Checks out a revision, detached.
pub fn run_checkout(global: &GlobalArgs, args: &CheckoutArgs) -> Result<()> {
    let repo = global.open_repository()?;
    let commit = repo.get_rev(&args.rev)?;
    commit.checkout()?;
    Ok(())
}

/// Resets a local branch to its remote counterpart.
pub fn run_remote_checkout(global: &GlobalArgs, args: &RemoteCheckoutArgs) -> Result<()> {
    let repo = global.open_repository()?;
    repo.remote_checkout(&args.branch)?;
    Ok(())
}

/// Fetches every configured remote.
pub fn run_fetch(global: &GlobalArgs) -> Result<()> {
    let repo = global.open_repository()?;
    repo.fetch_all()?;
    Ok(())
}

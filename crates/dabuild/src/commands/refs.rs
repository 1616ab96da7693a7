//! Ref listing and lookup commands.

use anyhow::Result;
use clap::Args;

use super::GlobalArgs;

/// Arguments for the has-branch command.
#[derive(Debug, Args)]
pub struct HasBranchArgs {
    /// Branch name, without `refs/heads/`
    pub name: String,

    /// Ignore remote-tracking branches
    #[arg(short, long)]
    pub local_only: bool,
}

/// Arguments for the object-type command.
#[derive(Debug, Args)]
pub struct ObjectTypeArgs {
    /// Object id or revision expression
    pub object: String,
}

/// Prints every ref as `<id> <name>`, sorted by name.
pub fn run_refs(global: &GlobalArgs) -> Result<()> {
    let repo = global.open_repository()?;
    for (name, id) in repo.get_refs()? {
        println!("{id} {name}");
    }
    Ok(())
}

/// Prints `true` or `false`.
pub fn run_has_branch(global: &GlobalArgs, args: &HasBranchArgs) -> Result<()> {
    let repo = global.open_repository()?;
    println!("{}", repo.has_branch(&args.name, args.local_only)?);
    Ok(())
}

/// Prints the object type.
pub fn run_object_type(global: &GlobalArgs, args: &ObjectTypeArgs) -> Result<()> {
    let repo = global.open_repository()?;
    println!("{}", repo.get_object_type(&args.object)?);
    Ok(())
}

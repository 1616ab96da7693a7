//! CLI definition.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{self, GlobalArgs};

/// Inspect and drive Git working trees for package builds.
#[derive(Debug, Parser)]
#[command(name = "dabuild")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the working tree
    #[arg(short = 'C', long, global = true, env = "DABUILD_REPO", default_value = ".")]
    pub repo: PathBuf,

    /// Configuration file (default: dabuild.toml in the working tree or a parent)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default dabuild.toml into the working tree
    Init(commands::init::InitArgs),

    /// List every ref with the object it points at
    Refs,

    /// Check whether a branch exists locally or on the remote
    HasBranch(commands::refs::HasBranchArgs),

    /// Print the type of an object
    ObjectType(commands::refs::ObjectTypeArgs),

    /// Show a resolved commit
    Show(commands::rev::ShowArgs),

    /// Check whether one revision is an ancestor of another
    IsAncestor(commands::rev::IsAncestorArgs),

    /// Print the common ancestor of two revisions
    MergeBase(commands::rev::MergeBaseArgs),

    /// Print a file as it exists at a revision
    Cat(commands::file::CatArgs),

    /// Check whether a file exists at a revision
    Exists(commands::file::ExistsArgs),

    /// Remove untracked files and reset tracked files (destructive)
    Clean,

    /// Clean the working tree and check out a revision
    Checkout(commands::tree::CheckoutArgs),

    /// Clean the working tree and reset a branch to its remote counterpart
    RemoteCheckout(commands::tree::RemoteCheckoutArgs),

    /// Fetch all remotes
    Fetch,

    /// Record an upstream tarball against a revision with pristine-tar
    ImportTarball(commands::tarball::ImportArgs),

    /// Regenerate an upstream tarball with pristine-tar
    ExportTarball(commands::tarball::ExportArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let global = GlobalArgs {
            repo: self.repo,
            config: self.config,
        };

        match self.command {
            Commands::Init(args) => commands::init::run(&global, &args),
            Commands::Refs => commands::refs::run_refs(&global),
            Commands::HasBranch(args) => commands::refs::run_has_branch(&global, &args),
            Commands::ObjectType(args) => commands::refs::run_object_type(&global, &args),
            Commands::Show(args) => commands::rev::run_show(&global, &args),
            Commands::IsAncestor(args) => commands::rev::run_is_ancestor(&global, &args),
            Commands::MergeBase(args) => commands::rev::run_merge_base(&global, &args),
            Commands::Cat(args) => commands::file::run_cat(&global, &args),
            Commands::Exists(args) => commands::file::run_exists(&global, &args),
            Commands::Clean => commands::tree::run_clean(&global),
            Commands::Checkout(args) => commands::tree::run_checkout(&global, &args),
            Commands::RemoteCheckout(args) => commands::tree::run_remote_checkout(&global, &args),
            Commands::Fetch => commands::tree::run_fetch(&global),
            Commands::ImportTarball(args) => commands::tarball::run_import(&global, &args),
            Commands::ExportTarball(args) => commands::tarball::run_export(&global, &args),
        }
    }
}

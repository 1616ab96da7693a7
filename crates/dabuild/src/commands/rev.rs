//! Revision inspection commands.

use std::fmt;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use dabuild_commit::CommitObject;
use dabuild_git::{Ancestry, Commit};

use super::GlobalArgs;

/// Arguments for the show command.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Revision expression (branch, tag, hash, ...)
    pub rev: String,

    /// Treat the revision as a local branch name
    #[arg(long, conflicts_with = "tag")]
    pub branch: bool,

    /// Treat the revision as a tag name
    #[arg(long)]
    pub tag: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the is-ancestor command.
#[derive(Debug, Args)]
pub struct IsAncestorArgs {
    /// Possible ancestor
    pub older: String,

    /// Possible descendant
    pub newer: String,

    /// Treat equal revisions as unrelated
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the merge-base command.
#[derive(Debug, Args)]
pub struct MergeBaseArgs {
    /// First revision
    pub left: String,

    /// Second revision
    pub right: String,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    hash: &'a str,
    #[serde(flatten)]
    object: &'a CommitObject,
}

/// Prints a commit as text or JSON.
pub fn run_show(global: &GlobalArgs, args: &ShowArgs) -> Result<()> {
    let repo = global.open_repository()?;
    let commit = if args.branch {
        repo.read_branch_head(&args.rev)?
    } else if args.tag {
        repo.read_tag(&args.rev)?
    } else {
        repo.get_rev(&args.rev)?
    };

    if args.json {
        let output = ShowOutput {
            hash: commit.hash(),
            object: commit.object(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("failed to serialize commit")?
        );
    } else {
        let mut text = String::new();
        render(&commit, &mut text)?;
        print!("{text}");
    }
    Ok(())
}

fn render(commit: &Commit<'_>, out: &mut impl fmt::Write) -> fmt::Result {
    let object = commit.object();
    writeln!(out, "commit {}", commit.hash())?;
    writeln!(out, "tree {}", object.tree)?;
    for parent in &object.parents {
        writeln!(out, "parent {parent}")?;
    }
    if let Some(author) = &object.author {
        writeln!(out, "Author: {author}")?;
        writeln!(out, "Date:   {}", author.time.to_rfc2822())?;
    }
    writeln!(out)?;
    for line in object.summary.lines() {
        writeln!(out, "    {line}")?;
    }
    Ok(())
}

/// Prints `true` or `false`.
pub fn run_is_ancestor(global: &GlobalArgs, args: &IsAncestorArgs) -> Result<()> {
    let repo = global.open_repository()?;
    let result = if args.strict {
        let older = repo.get_rev(&args.older)?;
        let newer = repo.get_rev(&args.newer)?;
        older.is_strict_ancestor_of(&newer)?
    } else {
        repo.is_ancestor(&args.older, &args.newer)?
    };
    println!("{result}");
    Ok(())
}

/// Prints the merge base hash.
pub fn run_merge_base(global: &GlobalArgs, args: &MergeBaseArgs) -> Result<()> {
    let repo = global.open_repository()?;
    let base = repo.get_common_ancestor(&args.left, &args.right)?;
    println!("{base}");
    Ok(())
}

//! Git abstraction layer for dabuild.
//!
//! This crate drives the `git` and `pristine-tar` command-line tools:
//! - Reference listing and resolution
//! - Commit objects and their ancestry
//! - Working tree cleaning and checkouts
//! - Pristine tarball import and export

mod ancestry;
mod command;
mod commit;
mod error;
mod repository;

pub use ancestry::Ancestry;
pub use commit::Commit;
pub use error::{GitError, GitResult};
pub use repository::{
    AncestorStatus, DEFAULT_REMOTE, NOT_ANCESTOR_EXIT_CODE, ObjectType, Repository,
};

//! Commit object model for dabuild.
//!
//! This crate turns the raw text of a Git commit object (as printed by
//! `git cat-file commit <hash>`) into typed values:
//! - [`CommitObject`]: tree, parents, signatures and message
//! - [`Signature`]: an `author` or `committer` header line
//!
//! It never talks to Git itself; see `dabuild-git` for that.

mod error;
mod object;
mod signature;

pub use error::{CommitParseError, ParseResult};
pub use object::CommitObject;
pub use signature::Signature;

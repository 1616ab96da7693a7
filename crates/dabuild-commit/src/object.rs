//! Commit object as stored by Git.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CommitParseError, ParseResult, Signature};

/// The parsed text of a commit object.
///
/// Header lines are `key value` pairs up to the first blank line; everything
/// after that line is the message. Only `tree`, `parent`, `author` and
/// `committer` are interpreted, other headers (`encoding`, `gpgsig`,
/// `mergetag`, ...) are skipped together with their continuation lines.
///
/// Git accepts commits with odd identity lines, so an `author` or
/// `committer` that does not parse is left as `None` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitObject {
    /// Id of the root tree object.
    pub tree: String,

    /// Ids of the parent commits, in header order.
    pub parents: Vec<String>,

    /// The `author` header, if present.
    pub author: Option<Signature>,

    /// The `committer` header, if present.
    pub committer: Option<Signature>,

    /// The commit message following the header block.
    pub summary: String,
}

impl CommitObject {
    /// Parses the output of `git cat-file commit <hash>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the header has no `tree` line or more than one.
    pub fn parse(text: &str) -> ParseResult<Self> {
        let text = text.trim_end();
        let (header, summary) = match text.split_once("\n\n") {
            Some((header, message)) => (header, message),
            None => (text, ""),
        };

        let mut tree = None;
        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;

        for line in header.lines() {
            // Continuation of a multi-line header such as `gpgsig`.
            if line.starts_with(' ') {
                continue;
            }

            let Some((key, value)) = line.split_once(' ') else {
                continue;
            };

            match key {
                "tree" => {
                    if tree.replace(value.to_string()).is_some() {
                        return Err(CommitParseError::DuplicateTree);
                    }
                }
                "parent" => parents.push(value.to_string()),
                "author" => author = Signature::parse(value).ok(),
                "committer" => committer = Signature::parse(value).ok(),
                _ => {}
            }
        }

        Ok(Self {
            tree: tree.ok_or(CommitParseError::MissingTree)?,
            parents,
            author,
            committer,
            summary: summary.to_string(),
        })
    }

    /// Returns the first line of the message.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.summary.lines().next().unwrap_or("")
    }

    /// Returns true if the commit has no parents.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns true if the commit has two or more parents.
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

impl FromStr for CommitObject {
    type Err = CommitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

//! Commit parsing error types.

use thiserror::Error;

/// Errors raised while parsing commit object text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitParseError {
    /// The header has no `tree` line.
    #[error("commit object has no tree")]
    MissingTree,

    /// The header has more than one `tree` line.
    #[error("commit object has more than one tree")]
    DuplicateTree,

    /// An `author` or `committer` line could not be parsed.
    #[error("malformed signature: {0:?}")]
    MalformedSignature(String),
}

/// Result type for commit parsing.
pub type ParseResult<T> = Result<T, CommitParseError>;

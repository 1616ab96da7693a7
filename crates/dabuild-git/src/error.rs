//! Git error types.

use dabuild_commit::CommitParseError;
use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// An external command exited with a non-zero status.
    #[error("`{program} {}` failed with {}: {output}", .args.join(" "), exit_status(.code.as_ref()))]
    CommandFailed {
        /// Program that was run.
        program: String,
        /// Arguments passed to the program.
        args: Vec<String>,
        /// Exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// Captured stderr followed by stdout.
        output: String,
    },

    /// An external command could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that was run.
        program: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A reference expression did not resolve to an object.
    #[error("unresolved reference: {0}")]
    UnresolvedReference(String),

    /// A commit object could not be parsed.
    #[error("failed to parse commit {hash}: {source}")]
    Parse {
        /// Hash of the offending commit.
        hash: String,
        /// Parse failure.
        #[source]
        source: CommitParseError,
    },

    /// A path does not exist in a commit's tree.
    #[error("file not found: {path} at {commit}")]
    FileNotFound {
        /// Commit hash that was searched.
        commit: String,
        /// Path that was looked up.
        path: String,
    },

    /// Two revisions share no history.
    #[error("no common ancestor between {left} and {right}")]
    NoCommonAncestor {
        /// First revision.
        left: String,
        /// Second revision.
        right: String,
    },

    /// A command produced output that could not be interpreted.
    #[error("unexpected output from {command}: {line:?}")]
    MalformedOutput {
        /// Command that produced the output.
        command: String,
        /// Offending line.
        line: String,
    },
}

fn exit_status(code: Option<&i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code".to_string(),
    }
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;

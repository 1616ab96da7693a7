//! Git repository handle backed by the `git` command line.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{info, trace};

use crate::command::Invocation;
use crate::{Commit, GitError, GitResult};

/// Remote tracked when none is configured.
pub const DEFAULT_REMOTE: &str = "origin";

/// Exit status of `git merge-base --is-ancestor` when the first revision is
/// not an ancestor of the second. Any other non-zero status is an error.
pub const NOT_ANCESTOR_EXIT_CODE: i32 = 1;

/// Exit status of `git rev-parse --verify --quiet` for a name that does not
/// resolve, and of `git merge-base` when no merge base exists.
const NOT_FOUND_EXIT_CODE: i32 = 1;

/// Outcome of an ancestry test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AncestorStatus {
    /// The first revision is reachable from (or equal to) the second.
    Ancestor,
    /// The first revision is not reachable from the second.
    NotAncestor,
}

impl AncestorStatus {
    /// Returns true for [`AncestorStatus::Ancestor`].
    #[must_use]
    pub fn is_ancestor(self) -> bool {
        self == Self::Ancestor
    }
}

/// Kind of an object in the object store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// A commit.
    Commit,
    /// A directory listing.
    Tree,
    /// File content.
    Blob,
    /// An annotated tag.
    Tag,
}

impl ObjectType {
    /// Returns the name git uses for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Tree => "tree",
            Self::Blob => "blob",
            Self::Tag => "tag",
        }
    }
}

impl FromStr for ObjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commit" => Ok(Self::Commit),
            "tree" => Ok(Self::Tree),
            "blob" => Ok(Self::Blob),
            "tag" => Ok(Self::Tag),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Git working tree.
///
/// The handle holds no repository state of its own: every query runs `git`
/// in [`Repository::root`] and re-reads the answer. Mutating operations
/// (`clean`, checkouts) change the working tree on disk, so callers must not
/// drive the same working tree from several threads or processes at once.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
    remote: String,
    git_program: String,
    pristine_tar_program: String,
}

impl Repository {
    /// Creates a handle for the working tree at `root`, tracking
    /// [`DEFAULT_REMOTE`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            remote: DEFAULT_REMOTE.to_string(),
            git_program: "git".to_string(),
            pristine_tar_program: "pristine-tar".to_string(),
        }
    }

    /// Sets the remote used for remote-tracking branches.
    #[must_use]
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Sets the `git` executable.
    #[must_use]
    pub fn with_git_program(mut self, program: impl Into<String>) -> Self {
        self.git_program = program.into();
        self
    }

    /// Sets the `pristine-tar` executable.
    #[must_use]
    pub fn with_pristine_tar_program(mut self, program: impl Into<String>) -> Self {
        self.pristine_tar_program = program.into();
        self
    }

    /// Returns the working tree path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the tracked remote name.
    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub(crate) fn git(&self) -> Invocation<'_> {
        Invocation::new(&self.root, &self.git_program)
    }

    fn pristine_tar(&self) -> Invocation<'_> {
        Invocation::new(&self.root, &self.pristine_tar_program)
    }

    /// Returns every ref (branches, tags, remote-tracking branches) mapped to
    /// the object id it points at.
    ///
    /// # Errors
    ///
    /// Returns an error if `git show-ref` fails (including when the
    /// repository has no refs at all) or prints an unexpected line.
    pub fn get_refs(&self) -> GitResult<BTreeMap<String, String>> {
        let cmd = self.git().arg("show-ref");
        let output = cmd.read()?;

        let mut refs = BTreeMap::new();
        for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let (id, name) = line
                .split_once(char::is_whitespace)
                .ok_or_else(|| GitError::MalformedOutput {
                    command: cmd.describe(),
                    line: line.to_string(),
                })?;
            refs.insert(name.trim().to_string(), id.to_string());
        }

        trace!(count = refs.len(), "read refs");
        Ok(refs)
    }

    /// Returns true if a local branch `name` exists, or, unless `local_only`
    /// is set, a remote-tracking branch `<remote>/<name>`.
    ///
    /// # Errors
    ///
    /// Returns an error if refs cannot be listed.
    pub fn has_branch(&self, name: &str, local_only: bool) -> GitResult<bool> {
        let local_ref = format!("refs/heads/{name}");
        let remote_ref = format!("refs/remotes/{}/{name}", self.remote);

        let refs = self.get_refs()?;
        Ok(refs.contains_key(&local_ref) || (!local_only && refs.contains_key(&remote_ref)))
    }

    /// Resolves a reference expression to a full object id.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::UnresolvedReference`] if `name` names no object.
    pub fn resolve(&self, name: &str) -> GitResult<String> {
        if name.is_empty() || name.starts_with('-') {
            return Err(GitError::UnresolvedReference(name.to_string()));
        }

        let cmd = self.git().args(["rev-parse", "--verify", "--quiet", name]);
        let output = cmd.output()?;
        match output.exit_code {
            Some(0) => Ok(output.text()),
            Some(NOT_FOUND_EXIT_CODE) => Err(GitError::UnresolvedReference(name.to_string())),
            _ => Err(cmd.failure(&output)),
        }
    }

    /// Resolves a reference expression (branch, tag, `^{}` suffix, hash, ...)
    /// to a commit.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::UnresolvedReference`] if `name` names no object,
    /// or an error if the commit object cannot be read or parsed.
    pub fn get_rev(&self, name: &str) -> GitResult<Commit<'_>> {
        Commit::resolve(self, name)
    }

    /// Returns the commit at the head of local branch `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the branch does not exist.
    pub fn read_branch_head(&self, name: &str) -> GitResult<Commit<'_>> {
        self.get_rev(&format!("refs/heads/{name}^{{}}"))
    }

    /// Returns the commit tag `name` points at, peeling annotated tags.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag does not exist.
    pub fn read_tag(&self, name: &str) -> GitResult<Commit<'_>> {
        self.get_rev(&format!("refs/tags/{name}^{{}}"))
    }

    /// Removes untracked and ignored files and resets tracked files to
    /// `HEAD`. Uncommitted work is destroyed.
    ///
    /// # Errors
    ///
    /// Returns an error if `git clean` or `git reset` fails.
    pub fn clean(&self) -> GitResult<()> {
        info!(root = ?self.root, "cleaning working tree");
        self.git().args(["clean", "-xfd"]).run()?;
        self.git().args(["reset", "--hard"]).run()?;
        Ok(())
    }

    /// Cleans the working tree, then points local `branch` at
    /// `<remote>/<branch>` and checks it out, discarding local divergence.
    ///
    /// # Errors
    ///
    /// Returns an error if cleaning or the checkout fails.
    pub fn remote_checkout(&self, branch: &str) -> GitResult<()> {
        self.clean()?;
        let upstream = format!("{}/{branch}", self.remote);
        info!(branch, upstream, "checking out remote branch");
        self.git().args(["checkout", "-B", branch, upstream.as_str()]).run()?;
        Ok(())
    }

    /// Fetches every configured remote.
    ///
    /// # Errors
    ///
    /// Returns an error if `git fetch` fails.
    pub fn fetch_all(&self) -> GitResult<()> {
        info!(root = ?self.root, "fetching all remotes");
        self.git().args(["fetch", "--all"]).run()?;
        Ok(())
    }

    /// Returns the merge base of two revisions.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NoCommonAncestor`] if the histories are disjoint.
    pub fn get_common_ancestor(
        &self,
        rev1: impl AsRef<str>,
        rev2: impl AsRef<str>,
    ) -> GitResult<Commit<'_>> {
        let (rev1, rev2) = (rev1.as_ref(), rev2.as_ref());
        let cmd = self.git().args(["merge-base", rev1, rev2]);
        let output = cmd.output()?;
        match output.exit_code {
            Some(0) => Commit::resolve(self, &output.text()),
            Some(NOT_FOUND_EXIT_CODE) if output.stdout.is_empty() => {
                Err(GitError::NoCommonAncestor {
                    left: rev1.to_string(),
                    right: rev2.to_string(),
                })
            }
            _ => Err(cmd.failure(&output)),
        }
    }

    /// Tests whether `older` is an ancestor of `newer`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CommandFailed`] for any failure other than the
    /// documented "not an ancestor" status.
    pub fn ancestor_status(
        &self,
        older: impl AsRef<str>,
        newer: impl AsRef<str>,
    ) -> GitResult<AncestorStatus> {
        let cmd = self
            .git()
            .args(["merge-base", "--is-ancestor", older.as_ref(), newer.as_ref()]);
        let output = cmd.output()?;
        match output.exit_code {
            Some(0) => Ok(AncestorStatus::Ancestor),
            Some(NOT_ANCESTOR_EXIT_CODE) => Ok(AncestorStatus::NotAncestor),
            _ => Err(cmd.failure(&output)),
        }
    }

    /// Returns true if `older` is an ancestor of `newer` or equal to it.
    ///
    /// # Errors
    ///
    /// See [`Repository::ancestor_status`].
    pub fn is_ancestor(&self, older: impl AsRef<str>, newer: impl AsRef<str>) -> GitResult<bool> {
        self.ancestor_status(older, newer)
            .map(AncestorStatus::is_ancestor)
    }

    /// Returns the kind of object `id` names.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist.
    pub fn get_object_type(&self, id: impl AsRef<str>) -> GitResult<ObjectType> {
        let cmd = self.git().args(["cat-file", "-t", id.as_ref()]);
        let kind = cmd.read()?;
        kind.parse().map_err(|line| GitError::MalformedOutput {
            command: cmd.describe(),
            line,
        })
    }

    /// Records `tarball` with `pristine-tar` against revision `rev`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pristine-tar commit` fails.
    pub fn import_tarball(&self, tarball: &Path, rev: impl AsRef<str>) -> GitResult<()> {
        info!(?tarball, rev = rev.as_ref(), "importing tarball");
        self.pristine_tar()
            .arg("commit")
            .arg(tarball)
            .arg(rev.as_ref())
            .run()?;
        Ok(())
    }

    /// Regenerates `tarball` with `pristine-tar`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pristine-tar checkout` fails.
    pub fn export_tarball(&self, tarball: &Path) -> GitResult<()> {
        info!(?tarball, "exporting tarball");
        self.pristine_tar().arg("checkout").arg(tarball).run()?;
        Ok(())
    }
}

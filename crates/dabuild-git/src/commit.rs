//! Resolved commit handle.

use std::fmt;
use std::hash::{Hash, Hasher};

use dabuild_commit::CommitObject;
use tracing::{info, trace};

use crate::{Ancestry, GitError, GitResult, Repository};

/// One resolved commit of a [`Repository`].
///
/// The hash is fixed at construction and is the commit's identity: two
/// handles with the same hash compare equal even if they came from different
/// `Repository` values. Parents are kept as ids; use
/// [`Commit::parent_commits`] to resolve them.
#[derive(Clone)]
pub struct Commit<'repo> {
    repository: &'repo Repository,
    hash: String,
    object: CommitObject,
}

impl<'repo> Commit<'repo> {
    /// Resolves `name` in `repository` and reads the commit object.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::UnresolvedReference`] if `name` does not resolve,
    /// or [`GitError::Parse`] if the object text is malformed.
    pub fn resolve(repository: &'repo Repository, name: &str) -> GitResult<Self> {
        let hash = repository.resolve(name)?;
        let text = repository.git().args(["cat-file", "commit", hash.as_str()]).read()?;
        let object = CommitObject::parse(&text).map_err(|source| GitError::Parse {
            hash: hash.clone(),
            source,
        })?;

        trace!(name, %hash, tree = %object.tree, parents = object.parents.len(), "resolved commit");
        Ok(Self {
            repository,
            hash,
            object,
        })
    }

    /// Returns the repository this commit was resolved in.
    #[must_use]
    pub fn repository(&self) -> &'repo Repository {
        self.repository
    }

    /// Returns the full commit hash.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Returns the id of the commit's tree.
    #[must_use]
    pub fn tree(&self) -> &str {
        &self.object.tree
    }

    /// Returns the parent ids in order.
    #[must_use]
    pub fn parents(&self) -> &[String] {
        &self.object.parents
    }

    /// Returns the commit message.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.object.summary
    }

    /// Returns the first line of the commit message.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.object.subject()
    }

    /// Returns the parsed commit object.
    #[must_use]
    pub fn object(&self) -> &CommitObject {
        &self.object
    }

    /// Resolves each parent id to a commit of the same repository.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent cannot be read.
    pub fn parent_commits(&self) -> GitResult<Vec<Commit<'repo>>> {
        self.object
            .parents
            .iter()
            .map(|parent| Commit::resolve(self.repository, parent))
            .collect()
    }

    /// Cleans the working tree and checks out this commit (detached HEAD).
    ///
    /// # Errors
    ///
    /// Returns an error if cleaning or the checkout fails.
    pub fn checkout(&self) -> GitResult<()> {
        self.repository.clean()?;
        info!(hash = %self.hash, "checking out commit");
        self.repository
            .git()
            .args(["checkout", "--quiet", self.hash.as_str()])
            .run()?;
        Ok(())
    }

    /// Reads `path` as it exists in this commit's tree, without touching the
    /// working tree.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::FileNotFound`] if `path` is not a file in this
    /// commit, including paths that cannot name a tree entry (empty,
    /// absolute, or containing `..`).
    pub fn read_file(&self, path: &str) -> GitResult<Vec<u8>> {
        let not_found = || GitError::FileNotFound {
            commit: self.hash.clone(),
            path: path.to_string(),
        };

        if !is_tree_path(path) {
            return Err(not_found());
        }

        // Paths are taken from the top of the tree, not from `root`, and
        // never as pathspec magic.
        let listing = self
            .repository
            .git()
            .args([
                "--literal-pathspecs",
                "ls-tree",
                "--full-tree",
                "-z",
                self.hash.as_str(),
                "--",
                path,
            ])
            .run()?;

        // Entries look like `<mode> <type> <id>\t<path>` and are NUL-separated.
        let blob = listing
            .stdout
            .split(|&b| b == 0)
            .filter_map(|entry| {
                let entry = std::str::from_utf8(entry).ok()?;
                let (meta, name) = entry.split_once('\t')?;
                let mut fields = meta.split_whitespace();
                let (_mode, kind, id) = (fields.next()?, fields.next()?, fields.next()?);
                (name == path && kind == "blob").then(|| id.to_string())
            })
            .next()
            .ok_or_else(not_found)?;

        let content = self
            .repository
            .git()
            .args(["cat-file", "blob", blob.as_str()])
            .run()?;
        Ok(content.stdout)
    }

    /// Returns true if `path` is a file in this commit.
    ///
    /// # Errors
    ///
    /// Returns any failure of [`Commit::read_file`] other than
    /// [`GitError::FileNotFound`].
    pub fn file_exists(&self, path: &str) -> GitResult<bool> {
        match self.read_file(path) {
            Ok(_) => Ok(true),
            Err(GitError::FileNotFound { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Returns false for paths that cannot name an entry of a tree.
fn is_tree_path(path: &str) -> bool {
    !path.is_empty() && !path.starts_with('/') && !path.split('/').any(|part| part == "..")
}

impl Ancestry for Commit<'_> {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }

    fn is_ancestor_of(&self, other: &Self) -> GitResult<bool> {
        self.repository.is_ancestor(&self.hash, &other.hash)
    }

    fn common_ancestor_with(&self, other: &Self) -> GitResult<Self> {
        self.repository.get_common_ancestor(&self.hash, &other.hash)
    }
}

impl PartialEq for Commit<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Commit<'_> {}

impl Hash for Commit<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl AsRef<str> for Commit<'_> {
    fn as_ref(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for Commit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hash)
    }
}

impl fmt::Debug for Commit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<commit '{}' in repository '{}'>",
            self.hash,
            self.repository.root().display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_tree_path() {
        assert!(is_tree_path("README"));
        assert!(is_tree_path("debian/changelog"));
        assert!(is_tree_path("debian/patches/..fix-build.patch"));

        assert!(!is_tree_path(""));
        assert!(!is_tree_path("/README"));
        assert!(!is_tree_path("../x"));
        assert!(!is_tree_path("debian/../README"));
        assert!(!is_tree_path("debian/.."));
    }
}

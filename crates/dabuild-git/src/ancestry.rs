//! Partial ordering of commits by ancestry.

use crate::GitResult;

/// Ancestry relations over a commit DAG.
///
/// This is a partial order: for commits on unrelated branches both
/// [`Ancestry::is_ancestor_of`] and [`Ancestry::is_descendant_of`] are false.
/// Every relation except [`Ancestry::equals`] asks the repository and can
/// fail, which is why `PartialOrd` is not used.
pub trait Ancestry: Sized {
    /// Identity comparison.
    fn equals(&self, other: &Self) -> bool;

    /// `self <= other`: `self` is reachable from `other` or equal to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the ancestry test cannot be run.
    fn is_ancestor_of(&self, other: &Self) -> GitResult<bool>;

    /// The merge base of `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns an error if the histories are disjoint or the query fails.
    fn common_ancestor_with(&self, other: &Self) -> GitResult<Self>;

    /// `self >= other`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ancestry test cannot be run.
    fn is_descendant_of(&self, other: &Self) -> GitResult<bool> {
        other.is_ancestor_of(self)
    }

    /// `self < other`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ancestry test cannot be run.
    fn is_strict_ancestor_of(&self, other: &Self) -> GitResult<bool> {
        Ok(self.is_ancestor_of(other)? && !self.equals(other))
    }

    /// `self > other`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ancestry test cannot be run.
    fn is_strict_descendant_of(&self, other: &Self) -> GitResult<bool> {
        Ok(self.is_descendant_of(other)? && !self.equals(other))
    }
}

//! Repository operations against real git repositories.

mod common;

use std::fs;

use dabuild_git::{GitError, ObjectType, Repository};
use tempfile::TempDir;

use common::{commit_file, diverging_history, git, init_repo, linear_history, setup_repo};

/// An upstream repository with `master` and `release`, and a clone of it
/// that only has a local `master`.
fn setup_clone() -> (TempDir, TempDir) {
    let upstream = setup_repo();
    commit_file(upstream.path(), "README", "upstream\n", "Initial commit");
    git(upstream.path(), &["branch", "release"]);

    let clone = TempDir::new().expect("failed to create temp dir");
    git(
        clone.path(),
        &[
            "clone",
            "--quiet",
            upstream.path().to_str().unwrap(),
            ".",
        ],
    );
    git(clone.path(), &["config", "user.email", "test@example.com"]);
    git(clone.path(), &["config", "user.name", "Test User"]);
    git(clone.path(), &["config", "commit.gpgsign", "false"]);
    (upstream, clone)
}

#[test]
fn test_get_refs_lists_branches_and_tags() {
    let temp_dir = setup_repo();
    let dir = temp_dir.path();
    let (a, _, c) = linear_history(dir);
    git(dir, &["tag", "v1.0", &a]);

    let repo = Repository::new(dir);
    let refs = repo.get_refs().unwrap();

    assert_eq!(refs.get("refs/heads/master"), Some(&c));
    assert_eq!(refs.get("refs/tags/v1.0"), Some(&a));
    assert_eq!(refs.len(), 2);
}

#[test]
fn test_get_refs_fails_without_refs() {
    let temp_dir = setup_repo();
    let repo = Repository::new(temp_dir.path());

    assert!(matches!(
        repo.get_refs(),
        Err(GitError::CommandFailed { code: Some(1), .. })
    ));
}

#[test]
fn test_has_branch_local_only() {
    let (_upstream, clone) = setup_clone();
    let repo = Repository::new(clone.path());

    assert!(repo.has_branch("release", false).unwrap());
    assert!(!repo.has_branch("release", true).unwrap());

    git(clone.path(), &["branch", "release", "origin/release"]);
    assert!(repo.has_branch("release", true).unwrap());
}

#[test]
fn test_has_branch_uses_configured_remote() {
    let (_upstream, clone) = setup_clone();
    let repo = Repository::new(clone.path()).with_remote("upstream");

    assert!(!repo.has_branch("release", false).unwrap());
    assert!(repo.has_branch("master", false).unwrap());
}

#[test]
fn test_get_rev_round_trips_hash() {
    let temp_dir = setup_repo();
    let (_, b, _) = linear_history(temp_dir.path());
    let repo = Repository::new(temp_dir.path());

    let commit = repo.get_rev(&b).unwrap();
    assert_eq!(commit.hash(), b);
    assert_eq!(repo.get_rev(commit.hash()).unwrap().hash(), b);
}

#[test]
fn test_get_rev_resolves_expressions() {
    let temp_dir = setup_repo();
    let (a, b, c) = linear_history(temp_dir.path());
    let repo = Repository::new(temp_dir.path());

    assert_eq!(repo.get_rev("master").unwrap().hash(), c);
    assert_eq!(repo.get_rev("HEAD~1").unwrap().hash(), b);
    assert_eq!(repo.get_rev("master~2").unwrap().hash(), a);
    assert_eq!(repo.get_rev(&c[..12]).unwrap().hash(), c);
}

#[test]
fn test_get_rev_unresolved() {
    let temp_dir = setup_repo();
    linear_history(temp_dir.path());
    let repo = Repository::new(temp_dir.path());

    match repo.get_rev("no-such-branch") {
        Err(GitError::UnresolvedReference(name)) => assert_eq!(name, "no-such-branch"),
        other => panic!("expected UnresolvedReference, got {other:?}"),
    }
}

#[test]
fn test_read_branch_head() {
    let temp_dir = setup_repo();
    let dir = temp_dir.path();
    let (_, b1, _) = diverging_history(dir);
    let repo = Repository::new(dir);

    let head = repo.read_branch_head("b1").unwrap();
    assert_eq!(head.hash(), b1);
    assert_eq!(repo.get_object_type(head.hash()).unwrap(), ObjectType::Commit);

    assert!(matches!(
        repo.read_branch_head("missing"),
        Err(GitError::UnresolvedReference(_))
    ));
}

#[test]
fn test_read_tag_peels_annotated_tags() {
    let temp_dir = setup_repo();
    let dir = temp_dir.path();
    let (_, b, _) = linear_history(dir);
    git(dir, &["tag", "-a", "debian/1.0-1", "-m", "Release 1.0-1", &b]);
    let repo = Repository::new(dir);

    let tag_object = repo.resolve("refs/tags/debian/1.0-1").unwrap();
    assert_ne!(tag_object, b);
    assert_eq!(repo.get_object_type(&tag_object).unwrap(), ObjectType::Tag);

    let commit = repo.read_tag("debian/1.0-1").unwrap();
    assert_eq!(commit.hash(), b);
    assert_eq!(repo.get_object_type(&commit).unwrap(), ObjectType::Commit);
}

#[test]
fn test_get_object_type() {
    let temp_dir = setup_repo();
    let (_, _, c) = linear_history(temp_dir.path());
    let repo = Repository::new(temp_dir.path());
    let commit = repo.get_rev(&c).unwrap();

    assert_eq!(repo.get_object_type(&c).unwrap(), ObjectType::Commit);
    assert_eq!(repo.get_object_type(commit.tree()).unwrap(), ObjectType::Tree);
    assert_eq!(
        repo.get_object_type(format!("{c}:README")).unwrap(),
        ObjectType::Blob
    );
    assert!(repo.get_object_type("0123456789abcdef").is_err());
}

#[test]
fn test_is_ancestor_linear() {
    let temp_dir = setup_repo();
    let (a, b, c) = linear_history(temp_dir.path());
    let repo = Repository::new(temp_dir.path());

    assert!(repo.is_ancestor(&a, &c).unwrap());
    assert!(repo.is_ancestor(&a, &b).unwrap());
    assert!(!repo.is_ancestor(&c, &a).unwrap());
    assert!(repo.is_ancestor(&b, &b).unwrap());
}

#[test]
fn test_is_ancestor_diverging() {
    let temp_dir = setup_repo();
    let (a, b1, b2) = diverging_history(temp_dir.path());
    let repo = Repository::new(temp_dir.path());

    assert!(!repo.is_ancestor(&b1, &b2).unwrap());
    assert!(!repo.is_ancestor(&b2, &b1).unwrap());
    assert!(repo.is_ancestor(&a, "b1").unwrap());
}

#[test]
fn test_is_ancestor_propagates_real_failures() {
    let temp_dir = setup_repo();
    let (a, _, _) = linear_history(temp_dir.path());
    let repo = Repository::new(temp_dir.path());

    let result = repo.is_ancestor(&a, "0000000000000000000000000000000000000000");
    match result {
        Err(GitError::CommandFailed { code, .. }) => assert_ne!(code, Some(1)),
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[test]
fn test_get_common_ancestor() {
    let temp_dir = setup_repo();
    let (a, _, _) = diverging_history(temp_dir.path());
    let repo = Repository::new(temp_dir.path());

    assert_eq!(repo.get_common_ancestor("b1", "b2").unwrap().hash(), a);
    assert_eq!(repo.get_common_ancestor("master", "b2").unwrap().hash(), a);
}

#[test]
fn test_get_common_ancestor_disjoint_histories() {
    let temp_dir = setup_repo();
    let dir = temp_dir.path();
    commit_file(dir, "README", "main\n", "Main root");
    git(dir, &["checkout", "--quiet", "--orphan", "lonely"]);
    git(dir, &["rm", "--quiet", "-rf", "."]);
    commit_file(dir, "OTHER", "other\n", "Other root");
    let repo = Repository::new(dir);

    match repo.get_common_ancestor("master", "lonely") {
        Err(GitError::NoCommonAncestor { left, right }) => {
            assert_eq!(left, "master");
            assert_eq!(right, "lonely");
        }
        other => panic!("expected NoCommonAncestor, got {other:?}"),
    }
}

#[test]
fn test_clean_discards_local_changes() {
    let temp_dir = setup_repo();
    let dir = temp_dir.path();
    commit_file(dir, "README", "committed\n", "Initial commit");
    fs::write(dir.join("README"), "modified\n").unwrap();
    fs::write(dir.join("untracked.txt"), "junk").unwrap();
    fs::create_dir(dir.join("build")).unwrap();
    fs::write(dir.join("build/output.o"), "junk").unwrap();
    fs::write(dir.join(".gitignore"), "ignored.log\n").unwrap();
    fs::write(dir.join("ignored.log"), "junk").unwrap();

    Repository::new(dir).clean().unwrap();

    assert_eq!(fs::read_to_string(dir.join("README")).unwrap(), "committed\n");
    assert!(!dir.join("untracked.txt").exists());
    assert!(!dir.join("build").exists());
    assert!(!dir.join("ignored.log").exists());
    assert!(!dir.join(".gitignore").exists());
}

#[test]
fn test_remote_checkout_resets_to_remote_tip() {
    let (upstream, clone) = setup_clone();
    let remote_tip = commit_file(upstream.path(), "README", "newer\n", "Upstream change");
    git(upstream.path(), &["branch", "-f", "release", &remote_tip]);

    let repo = Repository::new(clone.path());
    repo.fetch_all().unwrap();

    // A diverged local branch is overwritten.
    git(clone.path(), &["checkout", "--quiet", "-b", "release"]);
    commit_file(clone.path(), "LOCAL", "local\n", "Local divergence");
    fs::write(clone.path().join("scratch"), "junk").unwrap();

    repo.remote_checkout("release").unwrap();

    assert_eq!(git(clone.path(), &["rev-parse", "release"]), remote_tip);
    assert_eq!(git(clone.path(), &["symbolic-ref", "HEAD"]), "refs/heads/release");
    assert_eq!(
        fs::read_to_string(clone.path().join("README")).unwrap(),
        "newer\n"
    );
    assert!(!clone.path().join("scratch").exists());
    assert!(!clone.path().join("LOCAL").exists());
}

#[test]
fn test_remote_checkout_missing_branch() {
    let (_upstream, clone) = setup_clone();
    let repo = Repository::new(clone.path());

    assert!(matches!(
        repo.remote_checkout("does-not-exist"),
        Err(GitError::CommandFailed { .. })
    ));
}

#[test]
fn test_tarball_commands_surface_failures() {
    let temp_dir = setup_repo();
    let dir = temp_dir.path();
    let (a, _, _) = linear_history(dir);
    let tarball = dir.join("hesiod_3.2.1.orig.tar.gz");

    let missing = Repository::new(dir).with_pristine_tar_program("dabuild-no-pristine-tar");
    assert!(matches!(
        missing.export_tarball(&tarball),
        Err(GitError::Spawn { .. })
    ));

    let failing = Repository::new(dir).with_pristine_tar_program("false");
    match failing.import_tarball(&tarball, &a) {
        Err(GitError::CommandFailed { program, args, code, .. }) => {
            assert_eq!(program, "false");
            assert_eq!(args[0], "commit");
            assert_eq!(args[2], a);
            assert_eq!(code, Some(1));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[test]
fn test_tarball_commands_succeed_with_zero_status() {
    let temp_dir = setup_repo();
    let dir = temp_dir.path();
    linear_history(dir);

    let repo = Repository::new(dir).with_pristine_tar_program("true");
    repo.import_tarball(&dir.join("x.tar.gz"), "master").unwrap();
    repo.export_tarball(&dir.join("x.tar.gz")).unwrap();
}

#[test]
fn test_get_rev_in_empty_repository() {
    let temp_dir = TempDir::new().unwrap();
    init_repo(temp_dir.path());
    let repo = Repository::new(temp_dir.path());
    assert!(matches!(
        repo.get_rev("HEAD"),
        Err(GitError::UnresolvedReference(_))
    ));
}

//! Throwaway git repositories for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Runs git in `dir` and returns trimmed stdout, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_DATE", "1700000000 +0000")
        .env("GIT_COMMITTER_DATE", "1700000000 +0000")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Creates an empty repository on branch `master` with a test identity.
pub fn init_repo(dir: &Path) {
    git(dir, &["init", "--quiet"]);
    git(dir, &["symbolic-ref", "HEAD", "refs/heads/master"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
    git(dir, &["config", "tag.gpgsign", "false"]);
}

/// Creates a temporary repository.
pub fn setup_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    init_repo(temp_dir.path());
    temp_dir
}

/// Writes `content` to `path`, commits everything, and returns the hash.
pub fn commit_file(dir: &Path, path: &str, content: &str, message: &str) -> String {
    let file = dir.join(path);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).expect("failed to create directories");
    }
    fs::write(&file, content).expect("failed to write file");
    git(dir, &["add", "--all"]);
    git(dir, &["commit", "--quiet", "-m", message]);
    git(dir, &["rev-parse", "HEAD"])
}

/// Builds a linear history `A -> B -> C` and returns the three hashes.
pub fn linear_history(dir: &Path) -> (String, String, String) {
    let a = commit_file(dir, "README", "a\n", "A");
    let b = commit_file(dir, "README", "b\n", "B");
    let c = commit_file(dir, "README", "c\n", "C");
    (a, b, c)
}

/// Builds `A` on master with branches `b1` and `b2` diverging from it.
pub fn diverging_history(dir: &Path) -> (String, String, String) {
    let a = commit_file(dir, "README", "a\n", "A");
    git(dir, &["checkout", "--quiet", "-b", "b1"]);
    let b1 = commit_file(dir, "one", "1\n", "B1");
    git(dir, &["checkout", "--quiet", "-b", "b2", &a]);
    let b2 = commit_file(dir, "two", "2\n", "B2");
    git(dir, &["checkout", "--quiet", "master"]);
    (a, b1, b2)
}

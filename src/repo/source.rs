// SPDX-License-Identifier: MIT

//! Per-repository commit extraction.

use crate::commit::CommitRecord;
use crate::error::{GitError, RelError, Result};
use git2::{Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A local mirror of one fleet repository.
pub struct RepoSource {
    name: String,
    path: PathBuf,
    repo: Git2Repo,
}

impl RepoSource {
    /// Open an existing local mirror.
    pub fn open(name: &str, path: &Path) -> Result<Self> {
        let repo = Git2Repo::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                RelError::Git(GitError::NotARepository {
                    path: path.to_path_buf(),
                })
            } else {
                RelError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        Ok(Self {
            name: name.to_string(),
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path to the local mirror.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commits reachable from `new` but not applied on `previous`.
    ///
    /// Uses `git cherry`, which compares patch content rather than hashes, so
    /// a commit already cherry-picked onto `previous` under a different hash
    /// is excluded. Only `+`-marked lines are kept; each surviving hash is
    /// resolved through libgit2 and turned into a [`CommitRecord`].
    ///
    /// Any failure here (unresolvable references, broken mirror) is fatal for
    /// this repository; the caller decides whether the run continues.
    pub fn collect_commits(&self, previous: &str, new: &str) -> Result<Vec<CommitRecord>> {
        let output = Command::new("git")
            .arg("cherry")
            .arg(previous)
            .arg(new)
            .current_dir(&self.path)
            .output()
            .map_err(|e| {
                RelError::Git(GitError::CherryFailed {
                    repo: self.name.clone(),
                    message: e.to_string(),
                })
            })?;

        if !output.status.success() {
            return Err(RelError::Git(GitError::CherryFailed {
                repo: self.name.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut commits = Vec::new();

        for hash in novel_hashes(&stdout) {
            let oid = Oid::from_str(hash).map_err(|e| {
                RelError::Git(GitError::InvalidReference {
                    reference: format!("{}: {}", hash, e.message()),
                })
            })?;
            let commit = self.repo.find_commit(oid).map_err(|e| {
                RelError::Git(GitError::InvalidReference {
                    reference: format!("{}: {}", hash, e.message()),
                })
            })?;
            commits.push(CommitRecord::from_git2(&self.name, &commit)?);
        }

        Ok(commits)
    }
}

/// Hashes of `+`-marked lines from `git cherry` output.
///
/// `-` lines are patches already present on the other side and are dropped.
fn novel_hashes(cherry_output: &str) -> Vec<&str> {
    cherry_output
        .lines()
        .filter_map(|line| line.strip_prefix('+'))
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_novel_hashes_filters_applied_patches() {
        let output = "+ aaa111\n- bbb222\n+ ccc333\n\n";
        assert_eq!(novel_hashes(output), vec!["aaa111", "ccc333"]);
    }

    #[test]
    fn test_novel_hashes_empty_output() {
        assert!(novel_hashes("").is_empty());
        assert!(novel_hashes("- aaa111\n").is_empty());
    }

    #[test]
    fn test_open_rejects_non_repository() {
        let dir = TempDir::new().unwrap();
        let result = RepoSource::open("empty", dir.path());
        assert!(matches!(
            result,
            Err(RelError::Git(GitError::NotARepository { .. }))
        ));
    }

    // Fixture: a real repository where one commit from the topic branch has
    // been cherry-picked back onto the default branch under a new hash.
    fn git(dir: &Path, date: &str, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .env("GIT_AUTHOR_NAME", "Jane Dev")
            .env("GIT_AUTHOR_EMAIL", "jane@example.com")
            .env("GIT_COMMITTER_NAME", "Jane Dev")
            .env("GIT_COMMITTER_EMAIL", "jane@example.com")
            .env("GIT_AUTHOR_DATE", date)
            .env("GIT_COMMITTER_DATE", date)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    fn cherry_fixture() -> (TempDir, String) {
        let dir = TempDir::new().unwrap();
        let path = dir.path();

        git(path, "2020-01-01T10:00:00Z", &["init", "--quiet"]);
        std::fs::write(path.join("a.txt"), "base\n").unwrap();
        git(path, "2020-01-01T10:00:00Z", &["add", "a.txt"]);
        git(
            path,
            "2020-01-01T10:00:00Z",
            &["commit", "--quiet", "-m", "Base commit"],
        );
        let default = git(path, "2020-01-01T10:00:00Z", &["rev-parse", "--abbrev-ref", "HEAD"]);

        git(path, "2020-01-02T10:00:00Z", &["checkout", "--quiet", "-b", "topic"]);
        std::fs::write(path.join("b.txt"), "shared\n").unwrap();
        git(path, "2020-01-02T10:00:00Z", &["add", "b.txt"]);
        git(
            path,
            "2020-01-02T10:00:00Z",
            &["commit", "--quiet", "-m", "Shared fix\n\nOXT-5"],
        );
        let shared = git(path, "2020-01-02T10:00:00Z", &["rev-parse", "HEAD"]);
        std::fs::write(path.join("c.txt"), "novel\n").unwrap();
        git(path, "2020-01-03T10:00:00Z", &["add", "c.txt"]);
        git(
            path,
            "2020-01-03T10:00:00Z",
            &[
                "commit",
                "--quiet",
                "-m",
                "Novel work\n\nSigned-off-by: Jane Dev <jane@example.com>",
            ],
        );

        // Reapply the shared fix on the default branch with a different
        // committer date, giving it a new hash but the same patch-id.
        git(path, "2020-01-04T10:00:00Z", &["checkout", "--quiet", &default]);
        git(path, "2020-01-04T10:00:00Z", &["cherry-pick", &shared]);
        let reapplied = git(path, "2020-01-04T10:00:00Z", &["rev-parse", "HEAD"]);
        assert_ne!(shared, reapplied, "cherry-pick must produce a new hash");

        (dir, default)
    }

    #[test]
    fn test_cherry_pick_aware_extraction() {
        let (dir, default) = cherry_fixture();
        let source = RepoSource::open("fixture", dir.path()).unwrap();

        let commits = source.collect_commits(&default, "topic").unwrap();
        let subjects: Vec<&str> = commits.iter().map(|c| c.subject.as_str()).collect();

        assert_eq!(
            subjects,
            vec!["Novel work"],
            "the reapplied patch must be excluded even though its hash differs"
        );
        assert_eq!(commits[0].repo, "fixture");
        assert_eq!(commits[0].signers, vec!["Jane Dev <jane@example.com>"]);
    }

    #[test]
    fn test_collect_commits_bad_reference() {
        let (dir, _default) = cherry_fixture();
        let source = RepoSource::open("fixture", dir.path()).unwrap();

        let result = source.collect_commits("no-such-ref", "topic");
        assert!(matches!(
            result,
            Err(RelError::Git(GitError::CherryFailed { .. }))
        ));
    }
}

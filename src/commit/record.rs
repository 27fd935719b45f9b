// SPDX-License-Identifier: MIT

//! Commit record extraction and message parsing.

use crate::error::{GitError, RelError, Result};
use chrono::DateTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

lazy_static! {
    /// Issue keys referenced anywhere in a commit message.
    static ref ISSUE_KEY_REGEX: Regex = Regex::new(r"OXT-[0-9]+").unwrap();

    /// Sign-off trailers; both spellings occur in the wild.
    static ref SIGNER_REGEX: Regex =
        Regex::new(r"Signed(?:-off-by| off by): ([^\r\n]+)").unwrap();
}

/// One commit extracted from a repository, identified by `(repo, hash)`.
///
/// Constructed once per raw commit and never mutated afterwards, except for
/// the `is_security` tag which is set during classification.
#[derive(Debug, Clone, Serialize)]
pub struct CommitRecord {
    /// Full commit hash, unique within the owning repository.
    pub hash: String,
    /// Owning repository name.
    pub repo: String,
    /// First paragraph of the message, trimmed, with `{` escaped for AsciiDoc.
    pub subject: String,
    /// Remainder of the message after the first blank line ("" if none).
    pub body: String,
    /// Commit timestamp, UTC ISO-8601.
    pub commit_date: String,
    /// Commit author's name.
    pub author_name: String,
    /// Commit author's email.
    pub author_email: String,
    /// Sign-off trailer names, in order of appearance, not yet deduplicated.
    pub signers: Vec<String>,
    /// Raw commit message as stored in the repository.
    #[serde(skip)]
    pub raw: String,
    /// Parent hashes; more than one marks a merge commit.
    #[serde(skip)]
    pub parent_hashes: Vec<String>,
    /// Issue keys referenced by the message, deduplicated.
    #[serde(skip)]
    pub issue_keys: BTreeSet<String>,
    /// Whether any linked issue belongs to a Security component.
    /// False until classification runs.
    #[serde(skip)]
    pub is_security: bool,
}

impl CommitRecord {
    /// Build a record from a resolved git2 commit.
    ///
    /// Missing author fields or non-UTF-8 messages indicate a malformed
    /// object and are fatal.
    pub fn from_git2(repo_name: &str, commit: &git2::Commit<'_>) -> Result<Self> {
        let hash = commit.id().to_string();

        let message = commit
            .message()
            .ok_or_else(|| invalid_encoding(&hash))?
            .to_string();
        let author = commit.author();
        let author_name = author
            .name()
            .ok_or_else(|| invalid_encoding(&hash))?
            .to_string();
        let author_email = author
            .email()
            .ok_or_else(|| invalid_encoding(&hash))?
            .to_string();

        let parent_hashes = commit.parent_ids().map(|id| id.to_string()).collect();

        Self::from_parts(
            repo_name,
            hash,
            message,
            author_name,
            author_email,
            commit.time().seconds(),
            parent_hashes,
        )
    }

    /// Build a record from already-extracted commit fields.
    pub fn from_parts(
        repo_name: &str,
        hash: String,
        message: String,
        author_name: String,
        author_email: String,
        time_secs: i64,
        parent_hashes: Vec<String>,
    ) -> Result<Self> {
        let commit_date = DateTime::from_timestamp(time_secs, 0)
            .ok_or_else(|| {
                RelError::Git(GitError::InvalidReference {
                    reference: format!("{}: commit time {} out of range", hash, time_secs),
                })
            })?
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();

        let (subject, body) = split_message(&message);
        let issue_keys = ISSUE_KEY_REGEX
            .find_iter(&message)
            .map(|m| m.as_str().to_string())
            .collect();
        let signers = SIGNER_REGEX
            .captures_iter(&message)
            .map(|c| c[1].trim().to_string())
            .collect();

        Ok(Self {
            hash,
            repo: repo_name.to_string(),
            subject,
            body,
            commit_date,
            author_name,
            author_email,
            signers,
            raw: message,
            parent_hashes,
            issue_keys,
            is_security: false,
        })
    }

    /// Whether this is a merge commit.
    pub fn is_merge(&self) -> bool {
        self.parent_hashes.len() > 1
    }
}

fn invalid_encoding(hash: &str) -> RelError {
    RelError::Git(GitError::InvalidEncoding {
        hash: hash.to_string(),
    })
}

/// Split a message on the first blank line into subject and body.
///
/// The subject has literal `{` escaped so AsciiDoc does not treat it as an
/// attribute reference downstream.
fn split_message(message: &str) -> (String, String) {
    let (subject, body) = match message.find("\n\n") {
        Some(pos) => (&message[..pos], &message[pos + 2..]),
        None => (message, ""),
    };

    (
        subject.trim().replace('{', "\\{"),
        body.trim().to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str) -> CommitRecord {
        CommitRecord::from_parts(
            "manager",
            "d3adb33f".to_string(),
            message.to_string(),
            "Jane Dev".to_string(),
            "jane@example.com".to_string(),
            1_500_000_000,
            vec!["p1".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_subject_body_split() {
        let c = record("Fix input handler\n\nLonger explanation\nover two lines.\n");
        assert_eq!(c.subject, "Fix input handler");
        assert_eq!(c.body, "Longer explanation\nover two lines.");
    }

    #[test]
    fn test_subject_only_message() {
        let c = record("Fix input handler\n");
        assert_eq!(c.subject, "Fix input handler");
        assert_eq!(c.body, "");
    }

    #[test]
    fn test_subject_brace_escaped() {
        let c = record("Handle {attr} literally\n\nbody\n");
        assert_eq!(c.subject, "Handle \\{attr} literally");
    }

    #[test]
    fn test_issue_keys_deduplicated() {
        let c = record("Fix OXT-123\n\nAlso touches OXT-123 and OXT-9.\n");
        let keys: Vec<&str> = c.issue_keys.iter().map(|s| s.as_str()).collect();
        assert_eq!(keys, vec!["OXT-123", "OXT-9"]);
    }

    #[test]
    fn test_no_issue_keys() {
        let c = record("Plain refactor\n\nNothing tracked here.\n");
        assert!(c.issue_keys.is_empty());
    }

    #[test]
    fn test_signers_both_spellings_in_order() {
        let c = record(
            "Subject\n\nBody\n\nSigned-off-by: Alice <a@x>\nSigned off by: Bob <b@x>\nSigned-off-by: Alice <a@x>\n",
        );
        assert_eq!(
            c.signers,
            vec!["Alice <a@x>", "Bob <b@x>", "Alice <a@x>"],
            "construction keeps duplicates and appearance order"
        );
    }

    #[test]
    fn test_commit_date_iso8601_utc() {
        let c = record("Subject\n");
        assert_eq!(c.commit_date, "2017-07-14T02:40:00Z");
    }

    #[test]
    fn test_merge_detection() {
        let mut c = record("Merge branch 'stable'\n");
        assert!(!c.is_merge());
        c.parent_hashes.push("p2".to_string());
        assert!(c.is_merge());
    }

    #[test]
    fn test_serialized_dump_fields() {
        let c = record("Subject\n\nOXT-1\n");
        let value = serde_json::to_value(&c).unwrap();
        let obj = value.as_object().unwrap();
        for field in [
            "hash",
            "repo",
            "subject",
            "body",
            "commit_date",
            "author_name",
            "author_email",
            "signers",
        ] {
            assert!(obj.contains_key(field), "missing {}", field);
        }
        assert!(!obj.contains_key("issue_keys"));
        assert!(!obj.contains_key("is_security"));
    }
}

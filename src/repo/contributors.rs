// SPDX-License-Identifier: MIT

//! Author and contributor derivation.

use crate::commit::CommitRecord;
use std::collections::BTreeMap;

/// People associated with one repository's extracted commits.
#[derive(Debug, Clone, Default)]
pub struct Contributors {
    /// Author email to name, first-seen name wins per email.
    pub authors: BTreeMap<String, String>,
    /// Deduplicated sign-off names, in order of first appearance.
    pub signers: Vec<String>,
}

/// Derive authors and signers from a repository's commit set.
///
/// Merge commits are skipped entirely; a merge does not represent original
/// authorship.
pub fn contributors(commits: &[CommitRecord]) -> Contributors {
    let mut result = Contributors::default();

    for commit in commits {
        if commit.is_merge() {
            continue;
        }

        result
            .authors
            .entry(commit.author_email.clone())
            .or_insert_with(|| commit.author_name.clone());

        for signer in &commit.signers {
            if !result.signers.contains(signer) {
                result.signers.push(signer.clone());
            }
        }
    }

    result
}

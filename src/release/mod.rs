// SPDX-License-Identifier: MIT

//! Release aggregation.
//!
//! Drives extraction and classification across every repository in scope and
//! merges the results into one release-wide report.

use crate::classify::{classify, CategoryReport};
use crate::commit::CommitRecord;
use crate::error::{ReleaseError, Result};
use crate::repo::{contributors, RepoSource};
use crate::tracker::IssueLookup;
use std::collections::{BTreeMap, BTreeSet};

/// Knobs for one release run.
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// Resolve every referenced issue key before classification. When off,
    /// resolution still happens lazily during classification.
    pub prefetch_issues: bool,
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        Self {
            prefetch_issues: true,
        }
    }
}

/// Per-repository extraction outcome.
///
/// Extraction failures are data, not exceptions: the orchestration loop
/// inspects the tag and a skipped repository simply contributes nothing.
#[derive(Debug)]
pub enum RepoOutcome {
    Collected(Vec<CommitRecord>),
    Skipped { reason: String },
}

/// The release-wide report handed to the renderer.
#[derive(Debug, Default)]
pub struct ReleaseAggregate {
    /// Union of all per-repository category reports (concatenated, not
    /// deduplicated; dedup happens per rendered section).
    pub categorized: CategoryReport,
    /// Unique contributor names across the release, from sign-off trailers.
    pub contributors: BTreeSet<String>,
    /// Every retained commit, keyed by repository, for the archival dump.
    pub by_repo: BTreeMap<String, Vec<CommitRecord>>,
}

impl ReleaseAggregate {
    /// Total number of extracted commits across all repositories.
    pub fn commit_count(&self) -> usize {
        self.by_repo.values().map(Vec::len).sum()
    }

    /// Fold one repository's commit set into the aggregate.
    pub fn absorb_repo<L: IssueLookup>(
        &mut self,
        repo_name: &str,
        commits: Vec<CommitRecord>,
        lookup: &mut L,
        options: &ReleaseOptions,
    ) {
        if options.prefetch_issues {
            for commit in &commits {
                for key in &commit.issue_keys {
                    lookup.get(key);
                }
            }
        }

        let report = classify(&commits, lookup);
        self.categorized.merge(report);

        let people = contributors(&commits);
        self.contributors.extend(people.signers);

        self.by_repo.insert(repo_name.to_string(), commits);
    }
}

/// Run extraction, classification, and merging over all repositories.
///
/// A repository whose extraction fails is skipped with a diagnostic; the run
/// only fails when no repository yields a single commit.
pub fn generate<L: IssueLookup>(
    sources: &[RepoSource],
    previous: &str,
    new: &str,
    lookup: &mut L,
    options: &ReleaseOptions,
) -> Result<ReleaseAggregate> {
    let mut aggregate = ReleaseAggregate::default();

    for source in sources {
        let outcome = match source.collect_commits(previous, new) {
            Ok(commits) => RepoOutcome::Collected(commits),
            Err(err) => RepoOutcome::Skipped {
                reason: err.to_string(),
            },
        };

        match outcome {
            RepoOutcome::Collected(commits) => {
                tracing::info!(
                    "{}: {} commits between {} and {}",
                    source.name(),
                    commits.len(),
                    previous,
                    new
                );
                if commits.is_empty() {
                    continue;
                }
                aggregate.absorb_repo(source.name(), commits, lookup, options);
            }
            RepoOutcome::Skipped { reason } => {
                tracing::warn!("skipping {}: {}", source.name(), reason);
            }
        }
    }

    if aggregate.commit_count() == 0 {
        return Err(ReleaseError::NothingToRelease {
            previous: previous.to_string(),
            new: new.to_string(),
        }
        .into());
    }

    Ok(aggregate)
}

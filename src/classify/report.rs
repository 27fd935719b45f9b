// SPDX-License-Identifier: MIT

//! Categorized commit report.

use crate::commit::CommitRecord;
use std::collections::{BTreeMap, HashSet};

use super::category::Category;

/// Commits bucketed by category.
///
/// Every category is present from construction, with possibly-empty lists.
/// A commit referencing issues of several types appears in several buckets;
/// merging reports concatenates per bucket and never deduplicates. Dedup by
/// hash happens only when a flat list is produced for one output section.
#[derive(Debug, Clone)]
pub struct CategoryReport {
    buckets: BTreeMap<Category, Vec<CommitRecord>>,
}

impl Default for CategoryReport {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryReport {
    /// An empty report with all category buckets seeded.
    pub fn new() -> Self {
        let mut buckets = BTreeMap::new();
        for category in Category::ALL {
            buckets.insert(category, Vec::new());
        }
        Self { buckets }
    }

    /// File a commit under a category.
    pub fn push(&mut self, category: Category, commit: CommitRecord) {
        // new() seeds every category, the lookup cannot miss
        self.buckets
            .entry(category)
            .or_default()
            .push(commit);
    }

    /// Commits filed under one category, in insertion order.
    pub fn get(&self, category: Category) -> &[CommitRecord] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Concatenate another report into this one, per category.
    pub fn merge(&mut self, other: CategoryReport) {
        for (category, mut commits) in other.buckets {
            self.buckets
                .entry(category)
                .or_default()
                .append(&mut commits);
        }
    }

    /// Total number of filings across all buckets (duplicates included).
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Flatten the given categories into one list, in category order.
    pub fn collect(&self, categories: &[Category]) -> Vec<CommitRecord> {
        categories
            .iter()
            .flat_map(|c| self.get(*c).iter().cloned())
            .collect()
    }

    /// Every security-tagged filing across all categories.
    pub fn security_commits(&self) -> Vec<CommitRecord> {
        Category::ALL
            .iter()
            .flat_map(|c| self.get(*c).iter())
            .filter(|c| c.is_security)
            .cloned()
            .collect()
    }
}

/// Drop repeated hashes, keeping the first occurrence of each.
///
/// Cross-repository cherry-picks carry distinct hashes and survive this on
/// purpose; only exact re-filings of the same commit collapse.
pub fn dedup_by_hash(commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
    let mut seen = HashSet::new();
    commits
        .into_iter()
        .filter(|c| seen.insert(c.hash.clone()))
        .collect()
}

// SPDX-License-Identifier: MIT

//! Commit classification.

use crate::commit::CommitRecord;
use crate::tracker::IssueLookup;

use super::category::Category;
use super::report::CategoryReport;

/// Synthetic key a commit can carry to opt out of issue classification.
const NO_ASSIGNED_ISSUE: &str = "No Assigned Issue";

/// Bucket every non-merge commit into the report.
///
/// A commit with no issue keys goes to `NoAssignedIssue`. Otherwise each of
/// its keys files it once: under the issue's type when the key resolves,
/// under `NoAssignedIssue` when it does not. The security tag is computed
/// across all of the commit's issues before any filing, so every listing of
/// the commit carries the same flag.
pub fn classify<L: IssueLookup>(commits: &[CommitRecord], lookup: &mut L) -> CategoryReport {
    let mut report = CategoryReport::new();

    for commit in commits {
        if commit.is_merge() {
            continue;
        }

        let mut record = commit.clone();
        record.is_security = false;

        if record.issue_keys.is_empty() || record.issue_keys.contains(NO_ASSIGNED_ISSUE) {
            report.push(Category::NoAssignedIssue, record);
            continue;
        }

        let mut filings = Vec::with_capacity(record.issue_keys.len());
        for key in &record.issue_keys {
            match lookup.get(key) {
                Some(meta) => {
                    if meta.is_security() {
                        record.is_security = true;
                    }
                    filings.push(Category::from(meta.issue_type));
                }
                None => filings.push(Category::NoAssignedIssue),
            }
        }

        for category in filings {
            report.push(category, record.clone());
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{IssueMetadata, IssueType};
    use std::collections::HashMap;

    /// Lookup stub backed by a plain map; unknown keys resolve to `None`.
    struct StubLookup {
        issues: HashMap<String, IssueMetadata>,
        calls: Vec<String>,
    }

    impl StubLookup {
        fn new(entries: &[(&str, IssueType, &[&str])]) -> Self {
            let issues = entries
                .iter()
                .map(|(key, issue_type, components)| {
                    (
                        key.to_string(),
                        IssueMetadata {
                            issue_type: *issue_type,
                            components: components.iter().map(|c| c.to_string()).collect(),
                        },
                    )
                })
                .collect();
            Self {
                issues,
                calls: Vec::new(),
            }
        }
    }

    impl IssueLookup for StubLookup {
        fn get(&mut self, key: &str) -> Option<IssueMetadata> {
            self.calls.push(key.to_string());
            self.issues.get(key).cloned()
        }
    }

    fn commit(hash: &str, message: &str, parents: usize) -> CommitRecord {
        CommitRecord::from_parts(
            "manager",
            hash.to_string(),
            message.to_string(),
            "Jane Dev".to_string(),
            "jane@example.com".to_string(),
            1_500_000_000,
            (0..parents).map(|i| format!("p{}", i)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_scenario_merge_bug_and_unassigned() {
        let commits = vec![
            commit("aaa", "Merge branch 'stable'\n", 2),
            commit("bbb", "Fix crash\n\nOXT-1\n", 1),
            commit("ccc", "No issue work\n", 1),
        ];
        let mut lookup = StubLookup::new(&[("OXT-1", IssueType::Bug, &["Security Team"])]);

        let report = classify(&commits, &mut lookup);

        let bugs = report.get(Category::Bug);
        assert_eq!(bugs.len(), 1);
        assert_eq!(bugs[0].hash, "bbb");
        assert!(bugs[0].is_security);

        let unassigned = report.get(Category::NoAssignedIssue);
        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0].hash, "ccc");

        // The merge commit appears nowhere
        assert_eq!(report.total(), 2);
    }

    #[test]
    fn test_merge_commits_excluded_everywhere() {
        let commits = vec![commit("aaa", "Merge OXT-1 work\n\nOXT-1\n", 2)];
        let mut lookup = StubLookup::new(&[("OXT-1", IssueType::Bug, &[])]);

        let report = classify(&commits, &mut lookup);
        assert_eq!(report.total(), 0);
        assert!(lookup.calls.is_empty(), "merge commits trigger no lookups");
    }

    #[test]
    fn test_no_keys_falls_back_to_unassigned() {
        let commits = vec![commit("aaa", "Refactor only\n", 1)];
        let mut lookup = StubLookup::new(&[]);

        let report = classify(&commits, &mut lookup);
        assert_eq!(report.get(Category::NoAssignedIssue).len(), 1);
    }

    #[test]
    fn test_unresolved_key_falls_back_to_unassigned() {
        let commits = vec![commit("aaa", "Fix thing\n\nOXT-404\n", 1)];
        let mut lookup = StubLookup::new(&[]);

        let report = classify(&commits, &mut lookup);
        assert_eq!(report.get(Category::NoAssignedIssue).len(), 1);
        assert_eq!(lookup.calls, vec!["OXT-404"]);
    }

    #[test]
    fn test_multi_issue_commit_filed_under_each_type() {
        let commits = vec![commit("aaa", "Wide change\n\nOXT-1 OXT-2\n", 1)];
        let mut lookup = StubLookup::new(&[
            ("OXT-1", IssueType::Bug, &[]),
            ("OXT-2", IssueType::NewFeature, &["Security Group"]),
        ]);

        let report = classify(&commits, &mut lookup);
        assert_eq!(report.get(Category::Bug).len(), 1);
        assert_eq!(report.get(Category::NewFeature).len(), 1);
        // The security flag from one issue is visible on every filing
        assert!(report.get(Category::Bug)[0].is_security);
        assert!(report.get(Category::NewFeature)[0].is_security);
    }

    #[test]
    fn test_non_security_components_leave_flag_unset() {
        let commits = vec![commit("aaa", "Fix thing\n\nOXT-1\n", 1)];
        let mut lookup = StubLookup::new(&[("OXT-1", IssueType::Bug, &["Installer", "UI"])]);

        let report = classify(&commits, &mut lookup);
        assert!(!report.get(Category::Bug)[0].is_security);
    }
}

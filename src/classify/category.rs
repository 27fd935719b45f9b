// SPDX-License-Identifier: MIT

//! Report categories.

use crate::tracker::IssueType;
use std::fmt;

/// Fixed set of buckets a commit can be filed under.
///
/// Every tracker issue type maps to one category; commits without a usable
/// issue land in `NoAssignedIssue`. The report is seeded with all categories
/// so empty buckets still appear in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    NewFeature,
    Improvement,
    Bug,
    Task,
    SubTask,
    Story,
    Epic,
    NoAssignedIssue,
}

impl Category {
    /// All categories, in report order.
    pub const ALL: [Category; 8] = [
        Category::NewFeature,
        Category::Improvement,
        Category::Bug,
        Category::Task,
        Category::SubTask,
        Category::Story,
        Category::Epic,
        Category::NoAssignedIssue,
    ];

    /// Categories listed on the Feature Additions page.
    pub const FEATURES: [Category; 2] = [Category::NewFeature, Category::Improvement];

    /// Categories listed on the Maintenance Changes page.
    pub const MAINTENANCE: [Category; 6] = [
        Category::Bug,
        Category::Task,
        Category::SubTask,
        Category::Story,
        Category::Epic,
        Category::NoAssignedIssue,
    ];

    /// Human-readable label used in the rendered document.
    pub fn label(&self) -> &'static str {
        match self {
            Category::NoAssignedIssue => "No Assigned Issue",
            Category::NewFeature => IssueType::NewFeature.name(),
            Category::Improvement => IssueType::Improvement.name(),
            Category::Bug => IssueType::Bug.name(),
            Category::Task => IssueType::Task.name(),
            Category::SubTask => IssueType::SubTask.name(),
            Category::Story => IssueType::Story.name(),
            Category::Epic => IssueType::Epic.name(),
        }
    }
}

impl From<IssueType> for Category {
    fn from(issue_type: IssueType) -> Self {
        match issue_type {
            IssueType::NewFeature => Category::NewFeature,
            IssueType::Improvement => Category::Improvement,
            IssueType::Bug => Category::Bug,
            IssueType::Task => Category::Task,
            IssueType::SubTask => Category::SubTask,
            IssueType::Story => Category::Story,
            IssueType::Epic => Category::Epic,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// SPDX-License-Identifier: MIT

//! Issue metadata types.

use crate::error::TrackerError;
use std::fmt;
use std::str::FromStr;

/// Issue type as reported by the tracker.
///
/// The tracker's type set is closed; an unrecognized name in a payload is an
/// error at the lookup boundary rather than a silent extra category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueType {
    NewFeature,
    Improvement,
    Bug,
    Task,
    SubTask,
    Story,
    Epic,
}

impl IssueType {
    /// Display name used by the tracker.
    pub fn name(&self) -> &'static str {
        match self {
            IssueType::NewFeature => "New Feature",
            IssueType::Improvement => "Improvement",
            IssueType::Bug => "Bug",
            IssueType::Task => "Task",
            IssueType::SubTask => "Sub-task",
            IssueType::Story => "Story",
            IssueType::Epic => "Epic",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IssueType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New Feature" => Ok(IssueType::NewFeature),
            "Improvement" => Ok(IssueType::Improvement),
            "Bug" => Ok(IssueType::Bug),
            "Task" => Ok(IssueType::Task),
            "Sub-task" => Ok(IssueType::SubTask),
            "Story" => Ok(IssueType::Story),
            "Epic" => Ok(IssueType::Epic),
            other => Err(TrackerError::UnknownIssueType {
                name: other.to_string(),
            }),
        }
    }
}

/// Metadata attached to one issue key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueMetadata {
    /// The issue's type, driving the report category.
    pub issue_type: IssueType,
    /// Component names the issue is filed under.
    pub components: Vec<String>,
}

impl IssueMetadata {
    /// Whether any component name marks this issue as security-relevant.
    pub fn is_security(&self) -> bool {
        self.components.iter().any(|c| c.contains("Security"))
    }
}

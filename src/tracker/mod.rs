// SPDX-License-Identifier: MIT

//! Issue tracker integration.
//!
//! Resolves issue keys referenced in commit messages to their tracker
//! metadata, memoized per run, tolerating a partially unreachable tracker.

mod cache;
mod client;
mod types;

pub use cache::IssueCache;
pub use client::{IssueLookup, TrackerClient};
pub use types::{IssueMetadata, IssueType};

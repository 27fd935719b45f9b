// SPDX-License-Identifier: MIT

//! relgen - fleet-wide release report generator
//!
//! Aggregates commit history across an organization's repositories between
//! two release references, classifies each commit by tracker issue metadata,
//! deduplicates cross-repository cherry-picks, and renders an AsciiDoc
//! release document.
//!
//! # Pipeline
//!
//! - **bootstrap**: list the fleet, verify references, maintain mirrors
//! - **repo**: cherry-pick-aware extraction of "new but not previous" commits
//! - **tracker**: memoized, failure-tolerant issue metadata lookups
//! - **classify**: bucket commits by issue type, tag security-relevant work
//! - **release**: merge per-repository reports into one aggregate
//! - **render**: format the aggregate as an AsciiDoc document
//!
//! # Example
//!
//! ```no_run
//! use relgen::repo::RepoSource;
//! use relgen::tracker::{IssueCache, TrackerClient};
//! use relgen::config::RelConfig;
//! use relgen::release::{generate, ReleaseOptions};
//!
//! let config = RelConfig::default();
//! let source = RepoSource::open("manager", "repos/manager.git".as_ref()).unwrap();
//!
//! let mut cache = IssueCache::new();
//! let mut lookup = TrackerClient::new(&config.tracker, &mut cache);
//! let aggregate = generate(
//!     &[source],
//!     "8.0.0",
//!     "9.0.0",
//!     &mut lookup,
//!     &ReleaseOptions::default(),
//! )
//! .unwrap();
//! println!("{} commits in release", aggregate.commit_count());
//! ```

// Module declarations
pub mod bootstrap;
pub mod classify;
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod release;
pub mod render;
pub mod repo;
pub mod tracker;

// Re-exports for convenience
pub use config::RelConfig;
pub use error::{RelError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of relgen.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}

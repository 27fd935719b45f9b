// SPDX-License-Identifier: MIT

//! Run-scoped issue memoization.

use crate::error::TrackerError;
use std::collections::HashMap;

use super::types::IssueMetadata;

/// Memoization cache for issue lookups, scoped to one release run.
///
/// Each key is fetched at most once; a failed fetch is recorded as `None` and
/// is never retried for the remainder of the run. The cache is owned by the
/// caller and passed into whatever needs lookups, so a run stays
/// side-effect-free and tests can seed it directly.
#[derive(Debug, Default)]
pub struct IssueCache {
    entries: HashMap<String, Option<IssueMetadata>>,
}

impl IssueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, fetching it once if absent.
    ///
    /// A fetch error is logged and cached as a miss; the release run keeps
    /// going and the failing key resolves to "unassigned" everywhere.
    pub fn get_or_fetch<F>(&mut self, key: &str, fetch: F) -> Option<IssueMetadata>
    where
        F: FnOnce(&str) -> Result<IssueMetadata, TrackerError>,
    {
        if let Some(cached) = self.entries.get(key) {
            return cached.clone();
        }

        let resolved = match fetch(key) {
            Ok(meta) => Some(meta),
            Err(err) => {
                tracing::warn!("issue lookup failed: {}", err);
                None
            }
        };

        self.entries.insert(key.to_string(), resolved.clone());
        resolved
    }

    /// Seed an entry, e.g. from a test or a prefetch pass.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<IssueMetadata>) {
        self.entries.insert(key.into(), value);
    }

    /// Whether `key` has already been resolved (successfully or not).
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::IssueType;

    fn meta() -> IssueMetadata {
        IssueMetadata {
            issue_type: IssueType::Bug,
            components: vec![],
        }
    }

    #[test]
    fn test_fetch_happens_at_most_once() {
        let mut cache = IssueCache::new();
        let mut calls = 0;

        for _ in 0..3 {
            let got = cache.get_or_fetch("OXT-1", |_| {
                calls += 1;
                Ok(meta())
            });
            assert_eq!(got, Some(meta()));
        }

        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failure_is_sticky() {
        let mut cache = IssueCache::new();
        let mut calls = 0;

        let first = cache.get_or_fetch("OXT-404", |k| {
            calls += 1;
            Err(TrackerError::BadStatus {
                key: k.to_string(),
                status: 404,
            })
        });
        assert_eq!(first, None);

        // The failure is cached; the second resolution must not retry.
        let second = cache.get_or_fetch("OXT-404", |_| {
            calls += 1;
            Ok(meta())
        });
        assert_eq!(second, None);
        assert_eq!(calls, 1);
        assert!(cache.contains("OXT-404"));
    }

    #[test]
    fn test_seeded_entry_short_circuits() {
        let mut cache = IssueCache::new();
        cache.insert("OXT-7", Some(meta()));

        let got = cache.get_or_fetch("OXT-7", |_| {
            panic!("seeded key must not be fetched");
        });
        assert_eq!(got, Some(meta()));
    }
}

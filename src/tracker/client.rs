// SPDX-License-Identifier: MIT

//! Blocking issue-tracker client.

use crate::config::TrackerConfig;
use crate::error::TrackerError;

use super::cache::IssueCache;
use super::types::IssueMetadata;

/// The lookup seam the classifier depends on.
///
/// The production implementation is [`TrackerClient`]; tests substitute a
/// stub backed by a plain map.
pub trait IssueLookup {
    /// Resolve an issue key to its metadata, or `None` when the issue is
    /// unknown, unreachable, or malformed.
    fn get(&mut self, key: &str) -> Option<IssueMetadata>;
}

/// Issue-tracker REST client with run-scoped memoization.
///
/// Lookups are blocking; the single-threaded run tolerates that. The cache
/// is borrowed rather than owned so a prefetch pass and the classification
/// pass share one set of entries.
pub struct TrackerClient<'a> {
    http: reqwest::blocking::Client,
    api_url: String,
    cache: &'a mut IssueCache,
}

impl<'a> TrackerClient<'a> {
    pub fn new(config: &TrackerConfig, cache: &'a mut IssueCache) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            api_url: config.api_url.clone(),
            cache,
        }
    }
}

impl IssueLookup for TrackerClient<'_> {
    fn get(&mut self, key: &str) -> Option<IssueMetadata> {
        let http = &self.http;
        let api_url = &self.api_url;
        self.cache
            .get_or_fetch(key, |k| fetch_issue(http, api_url, k))
    }
}

/// One uncached fetch against the tracker's REST API.
fn fetch_issue(
    http: &reqwest::blocking::Client,
    api_url: &str,
    key: &str,
) -> Result<IssueMetadata, TrackerError> {
    let url = format!("{}/rest/api/latest/issue/{}", api_url, key);
    tracing::debug!("fetching issue {}", url);

    let response = http
        .get(&url)
        .send()
        .map_err(|e| TrackerError::RequestFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(TrackerError::BadStatus {
            key: key.to_string(),
            status: status.as_u16(),
        });
    }

    let payload: serde_json::Value =
        response
            .json()
            .map_err(|e| TrackerError::MalformedPayload {
                key: key.to_string(),
                message: e.to_string(),
            })?;

    parse_issue_payload(key, &payload)
}

/// Extract the issue type and component names from a tracker payload.
pub(crate) fn parse_issue_payload(
    key: &str,
    payload: &serde_json::Value,
) -> Result<IssueMetadata, TrackerError> {
    let type_name = payload["fields"]["issuetype"]["name"]
        .as_str()
        .ok_or_else(|| TrackerError::MalformedPayload {
            key: key.to_string(),
            message: "missing fields.issuetype.name".to_string(),
        })?;

    let issue_type = type_name.parse()?;

    let components = payload["fields"]["components"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|c| c["name"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(IssueMetadata {
        issue_type,
        components,
    })
}

// SPDX-License-Identifier: MIT

//! Repository bootstrap.
//!
//! Lists the organization's repositories, filters the blacklist, verifies
//! that both release references exist remotely, and maintains local mirrors.

use crate::config::ForgeConfig;
use crate::error::{BootstrapError, RelError, ReleaseError, Result};
use crate::repo::RepoSource;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Fetch the organization's repository list from the forge API.
///
/// A failure here is fatal for the whole run; without the list there is
/// nothing to release.
pub fn list_repositories(forge: &ForgeConfig) -> Result<Vec<String>> {
    let client = reqwest::blocking::Client::new();
    let response = client
        .get(&forge.list_url)
        // The GitHub API rejects requests without a User-Agent
        .header(reqwest::header::USER_AGENT, "relgen")
        .send()
        .map_err(|e| list_failed(forge, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(list_failed(forge, format!("status {}", status.as_u16())));
    }

    let payload: serde_json::Value = response
        .json()
        .map_err(|e| list_failed(forge, e.to_string()))?;

    parse_repo_list(&payload).map_err(|message| list_failed(forge, message))
}

fn list_failed(forge: &ForgeConfig, message: String) -> RelError {
    RelError::Bootstrap(BootstrapError::ListFailed {
        url: forge.list_url.clone(),
        message,
    })
}

/// Extract repository names from the forge list payload.
fn parse_repo_list(payload: &serde_json::Value) -> std::result::Result<Vec<String>, String> {
    let entries = payload
        .as_array()
        .ok_or_else(|| "expected a JSON array of repositories".to_string())?;

    Ok(entries
        .iter()
        .filter_map(|entry| entry["name"].as_str())
        .map(str::to_string)
        .collect())
}

/// Drop blacklisted repositories from the list.
pub fn apply_blacklist(names: Vec<String>, blacklist: &[String]) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| !blacklist.contains(name))
        .collect()
}

/// Verify a reference resolves to at least one head or tag on the remote.
pub fn check_remote_ref(forge: &ForgeConfig, name: &str, reference: &str) -> Result<()> {
    let url = clone_url(forge, name);
    let output = Command::new("git")
        .args(["ls-remote", "--heads", "--tags", &url, reference])
        .output()
        .map_err(|e| {
            RelError::Bootstrap(BootstrapError::MissingReference {
                repo: name.to_string(),
                reference: format!("{} ({})", reference, e),
            })
        })?;

    if !output.status.success() || output.stdout.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(RelError::Bootstrap(BootstrapError::MissingReference {
            repo: name.to_string(),
            reference: reference.to_string(),
        }));
    }

    Ok(())
}

/// Mirror-clone a repository into the workdir unless the mirror exists.
pub fn mirror(forge: &ForgeConfig, name: &str, workdir: &Path) -> Result<PathBuf> {
    let repodir = workdir.join(format!("{}.git", name));
    if repodir.is_dir() {
        tracing::debug!("reusing existing mirror {:?}", repodir);
        return Ok(repodir);
    }

    let url = clone_url(forge, name);
    tracing::info!("mirroring {}", url);

    let output = Command::new("git")
        .args(["clone", "--mirror", &url])
        .arg(&repodir)
        .output()
        .map_err(|e| mirror_failed(&url, e.to_string()))?;

    if !output.status.success() {
        return Err(mirror_failed(
            &url,
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(repodir)
}

fn mirror_failed(url: &str, message: String) -> RelError {
    RelError::Bootstrap(BootstrapError::MirrorFailed {
        url: url.to_string(),
        message,
    })
}

fn clone_url(forge: &ForgeConfig, name: &str) -> String {
    format!("{}/{}.git", forge.clone_url, name)
}

/// List, filter, verify, and mirror every in-scope repository.
///
/// A repository missing either reference or failing to mirror is skipped
/// with a diagnostic. An empty result is fatal: nothing has both references.
pub fn prepare_sources(
    forge: &ForgeConfig,
    previous: &str,
    new: &str,
    workdir: &Path,
) -> Result<Vec<RepoSource>> {
    std::fs::create_dir_all(workdir)?;

    let names = apply_blacklist(list_repositories(forge)?, &forge.blacklist);

    let mut sources = Vec::new();
    for name in names {
        let prepared = check_remote_ref(forge, &name, previous)
            .and_then(|_| check_remote_ref(forge, &name, new))
            .and_then(|_| mirror(forge, &name, workdir))
            .and_then(|repodir| RepoSource::open(&name, &repodir));

        match prepared {
            Ok(source) => sources.push(source),
            Err(err) => tracing::warn!("skipping {}: {}", name, err),
        }
    }

    if sources.is_empty() {
        return Err(ReleaseError::NoUsableRepositories {
            previous: previous.to_string(),
            new: new.to_string(),
        }
        .into());
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_repo_list() {
        let payload = json!([
            { "name": "manager", "fork": false },
            { "name": "installer" },
            { "no_name_here": true }
        ]);
        let names = parse_repo_list(&payload).unwrap();
        assert_eq!(names, vec!["manager", "installer"]);
    }

    #[test]
    fn test_parse_repo_list_rejects_non_array() {
        assert!(parse_repo_list(&json!({ "message": "rate limited" })).is_err());
    }

    #[test]
    fn test_apply_blacklist() {
        let names = vec![
            "manager".to_string(),
            "docs".to_string(),
            "installer".to_string(),
        ];
        let filtered = apply_blacklist(names, &["docs".to_string()]);
        assert_eq!(filtered, vec!["manager", "installer"]);
    }

    #[test]
    fn test_clone_url_shape() {
        let forge = ForgeConfig::default();
        assert_eq!(
            clone_url(&forge, "manager"),
            "https://github.com/OpenXT/manager.git"
        );
    }
}

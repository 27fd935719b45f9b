// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from relgen.toml.

use serde::{Deserialize, Serialize};

/// The main configuration structure for relgen.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RelConfig {
    /// Issue tracker configuration.
    pub tracker: TrackerConfig,

    /// Forge (repository host) configuration.
    pub forge: ForgeConfig,

    /// Publishing defaults for the rendered document.
    pub publish: PublishConfig,
}

impl RelConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// Issue tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// REST API base, queried as `<api_url>/rest/api/latest/issue/<key>`.
    pub api_url: String,

    /// Human-facing issue URL base, linked as `<browse_url>/<key>`.
    pub browse_url: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://openxt.atlassian.net".to_string(),
            browse_url: "https://openxt.atlassian.net/browse".to_string(),
        }
    }
}

/// Forge configuration: where the fleet of repositories lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Organization whose repositories are in scope for a release.
    pub org: String,

    /// API endpoint returning the organization's repository list.
    pub list_url: String,

    /// Clone URL base, expanded as `<clone_url>/<name>.git`.
    pub clone_url: String,

    /// Commit URL base, linked as `<commit_url>/<name>/commit/<hash>`.
    pub commit_url: String,

    /// Repositories excluded from the release scan.
    pub blacklist: Vec<String>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            org: "openxt".to_string(),
            list_url: "https://api.github.com/users/openxt/repos?per_page=100".to_string(),
            clone_url: "https://github.com/OpenXT".to_string(),
            commit_url: "https://github.com/OpenXT".to_string(),
            blacklist: vec![
                "bats-suite".to_string(),
                "bvt".to_string(),
                "docs".to_string(),
                "openxt.github.io".to_string(),
                "blktap".to_string(),
                "blktap3".to_string(),
                "bootage".to_string(),
                "cdrom-daemon".to_string(),
                "ocaml".to_string(),
                "meta-openxt-base".to_string(),
                "meta-openxt-qt".to_string(),
                "meta-openxt-remote-management".to_string(),
                "meta-selinux".to_string(),
            ],
        }
    }
}

/// Publishing defaults; any of these can be overridden on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Product name printed on the title page.
    pub product: String,

    /// Release version number printed on the title page.
    pub relnum: String,

    /// Document author's name.
    pub author: String,

    /// Document author's email.
    pub email: String,

    /// Copyright holding entity for the license appendix.
    pub entity: String,

    /// Revision number of the document itself.
    pub rev: String,

    /// Revision description ("First", "Second", ...).
    pub rev_string: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            product: "OpenXT".to_string(),
            relnum: "X.Y.Z".to_string(),
            author: "Author Name".to_string(),
            email: "author@email.com".to_string(),
            entity: "copyright holding entity".to_string(),
            rev: "1.0".to_string(),
            rev_string: "First".to_string(),
        }
    }
}

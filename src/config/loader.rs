// SPDX-License-Identifier: MIT

//! Configuration loading.

use crate::error::{ConfigError, RelError, Result};
use std::path::{Path, PathBuf};

use super::schema::RelConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["relgen.toml", ".relgen.toml", ".config/relgen.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Try parent directory
        if !current.pop() {
            break;
        }
    }

    // Also check user's home directory
    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let relgen_config = config_dir.join("relgen").join("config.toml");
            if relgen_config.exists() {
                return Some(relgen_config);
            }
        }
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<RelConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(RelConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<RelConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(RelError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        RelError::Config(ConfigError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<RelConfig> {
    toml::from_str(content).map_err(|e| {
        RelError::Config(ConfigError::ParseError {
            message: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(
            r#"
            [tracker]
            api_url = "https://issues.example.org"

            [publish]
            author = "Release Manager"
            "#,
        )
        .unwrap();
        assert_eq!(config.tracker.api_url, "https://issues.example.org");
        assert_eq!(config.publish.author, "Release Manager");
        // Untouched sections keep their defaults
        assert_eq!(config.publish.rev, "1.0");
        assert!(!config.forge.blacklist.is_empty());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config("[tracker\napi_url = oops");
        assert!(matches!(
            result,
            Err(RelError::Config(ConfigError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("relgen.toml"), "").unwrap();

        let found = find_config_file_from(&nested).unwrap();
        assert_eq!(found, dir.path().join("relgen.toml"));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = load_config_from(&dir.path().join("nope.toml"));
        assert!(matches!(
            result,
            Err(RelError::Config(ConfigError::NotFound { .. }))
        ));
    }
}

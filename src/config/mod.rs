// SPDX-License-Identifier: MIT

//! Configuration module.
//!
//! Handles loading relgen.toml and exposing the configuration schema.

pub mod loader;
mod schema;

pub use loader::{find_config_file, load_config, load_config_from, parse_config};
pub use schema::{ForgeConfig, PublishConfig, RelConfig, TrackerConfig};

// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// relgen - fleet-wide release report generator
///
/// Collects the commits that are new between two release references across
/// every repository of an organization, classifies them by tracker issue,
/// and writes an AsciiDoc release document.
#[derive(Parser, Debug)]
#[command(name = "relgen")]
#[command(version)]
#[command(about = "Generate a release report across a fleet of git repositories", long_about = None)]
pub struct Cli {
    /// Git reference of the previous release
    pub previous: String,

    /// Git reference of the new release
    pub new: String,

    /// Directory where repository mirrors are stored
    #[arg(short = 'p', long, default_value = "repos")]
    pub path: PathBuf,

    /// File name for the AsciiDoc document
    #[arg(short, long, default_value = "release.adoc")]
    pub output: PathBuf,

    /// Also write a JSON dump of every retained commit (commits.json)
    #[arg(short, long)]
    pub json: bool,

    /// Release version number
    #[arg(short = 'R', long)]
    pub relnum: Option<String>,

    /// Document author's name
    #[arg(short = 'A', long)]
    pub author: Option<String>,

    /// Document author's email
    #[arg(short = 'E', long)]
    pub email: Option<String>,

    /// Copyright holding entity
    #[arg(short = 'G', long)]
    pub entity: Option<String>,

    /// Path to a file with the "Platform" section body
    #[arg(short = 'P', long)]
    pub platform: Option<PathBuf>,

    /// Path to a file with the "Testing" section body
    #[arg(short = 'T', long)]
    pub testing: Option<PathBuf>,

    /// Path to a file with the "Known Issues" section body
    #[arg(short = 'K', long)]
    pub known: Option<PathBuf>,

    /// Resolve issue keys lazily during classification instead of up front
    #[arg(long)]
    pub no_prefetch: bool,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

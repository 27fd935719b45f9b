// SPDX-License-Identifier: MIT

//! Run orchestration.

use crate::config::RelConfig;
use crate::error::Result;
use crate::release::ReleaseOptions;
use crate::render::{ReleaseDocument, SectionBodies};
use crate::tracker::{IssueCache, TrackerClient};
use std::fs::File;
use std::io::BufWriter;

use super::args::Cli;

/// Archival dump written next to the document when `--json` is given.
const COMMITS_DUMP: &str = "commits.json";

/// Run a full release generation.
pub fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        RelConfig::load_from(config_path)?
    } else {
        RelConfig::load()?
    };
    apply_publish_overrides(&mut config, &cli);

    // Discover and mirror the fleet
    let sources =
        crate::bootstrap::prepare_sources(&config.forge, &cli.previous, &cli.new, &cli.path)?;
    tracing::info!("{} repositories in scope", sources.len());

    // Collect, classify, aggregate
    let mut cache = IssueCache::new();
    let mut lookup = TrackerClient::new(&config.tracker, &mut cache);
    let options = ReleaseOptions {
        prefetch_issues: !cli.no_prefetch,
    };
    let aggregate =
        crate::release::generate(&sources, &cli.previous, &cli.new, &mut lookup, &options)?;

    if cli.json {
        let dump = File::create(COMMITS_DUMP)?;
        serde_json::to_writer(BufWriter::new(dump), &aggregate.by_repo)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        tracing::info!("wrote {}", COMMITS_DUMP);
    }

    // The document is only opened once the aggregate is complete, so a
    // failed run never leaves a partial document behind.
    let out = File::create(&cli.output)?;
    let mut document = ReleaseDocument::new(
        BufWriter::new(out),
        &config.publish,
        &config.forge,
        &config.tracker,
    )?;
    let bodies = SectionBodies {
        platform: cli.platform.clone(),
        testing: cli.testing.clone(),
        known_issues: cli.known.clone(),
    };
    document.write_all(&aggregate, &bodies)?;

    tracing::info!(
        "wrote {} ({} commits, {} contributors)",
        cli.output.display(),
        aggregate.commit_count(),
        aggregate.contributors.len()
    );
    Ok(())
}

fn apply_publish_overrides(config: &mut RelConfig, cli: &Cli) {
    if let Some(relnum) = &cli.relnum {
        config.publish.relnum = relnum.clone();
    }
    if let Some(author) = &cli.author {
        config.publish.author = author.clone();
    }
    if let Some(email) = &cli.email {
        config.publish.email = email.clone();
    }
    if let Some(entity) = &cli.entity {
        config.publish.entity = entity.clone();
    }
}

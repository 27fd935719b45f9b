// SPDX-License-Identifier: MIT

//! AsciiDoc release document writer.

use crate::classify::{dedup_by_hash, Category, CategoryReport};
use crate::commit::CommitRecord;
use crate::config::{ForgeConfig, PublishConfig, TrackerConfig};
use crate::error::{RenderError, Result};
use crate::release::ReleaseAggregate;
use chrono::{Datelike, Utc};
use handlebars::Handlebars;
use serde_json::json;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

const HEADER_TEMPLATE: &str = "{{product}} {{relnum}} Release\n\
                               ====================\n\
                               {{author}} <{{email}}>\n\
                               v{{rev}}, {{month}}: {{rev_string}} revision\n\
                               :toc:\n\n";

const COMMIT_LINE_TEMPLATE: &str = "- {{forge}}/{{repo}}/commit/{{hash}}[{{repo}}/{{short}}]: \
                                    {{subject}}{{#if issues}}, \
                                    {{#each issues}}{{../browse}}/{{this}}[{{this}}] {{/each}}{{/if}}\n";

const LICENSE_TEMPLATE: &str = "[appendix]\n\
                                License\n\
                                -------\n\
                                Copyright {{year}} by <{{entity}}>. \
                                Created by {{author}} <{{email}}>. \
                                This work is licensed under the Creative Commons \
                                Attribution 4.0 International License. To view a copy of \
                                this license, visit http://creativecommons.org/licenses/by/4.0/.\n";

/// Paths to user-supplied bodies for the prose sections.
#[derive(Debug, Clone, Default)]
pub struct SectionBodies {
    pub platform: Option<PathBuf>,
    pub testing: Option<PathBuf>,
    pub known_issues: Option<PathBuf>,
}

/// Writes the release report as an AsciiDoc document.
///
/// Purely a formatting pass over an already-complete aggregate; nothing here
/// feeds back into collection or classification.
pub struct ReleaseDocument<W: Write> {
    out: W,
    publish: PublishConfig,
    commit_base: String,
    browse_base: String,
    hb: Handlebars<'static>,
}

impl<W: Write> ReleaseDocument<W> {
    pub fn new(
        out: W,
        publish: &PublishConfig,
        forge: &ForgeConfig,
        tracker: &TrackerConfig,
    ) -> Result<Self> {
        let mut hb = Handlebars::new();
        // The output is AsciiDoc, not HTML
        hb.register_escape_fn(handlebars::no_escape);
        for (name, template) in [
            ("header", HEADER_TEMPLATE),
            ("commit_line", COMMIT_LINE_TEMPLATE),
            ("license", LICENSE_TEMPLATE),
        ] {
            hb.register_template_string(name, template).map_err(|e| {
                RenderError::TemplateFailed {
                    message: e.to_string(),
                }
            })?;
        }

        Ok(Self {
            out,
            publish: publish.clone(),
            commit_base: forge.commit_url.clone(),
            browse_base: tracker.browse_url.clone(),
            hb,
        })
    }

    /// Render every page of the document, in order.
    pub fn write_all(&mut self, aggregate: &ReleaseAggregate, bodies: &SectionBodies) -> Result<()> {
        self.header_page()?;
        self.platform_page(bodies.platform.as_deref())?;
        self.features_page(&aggregate.categorized)?;
        self.security_page(&aggregate.categorized)?;
        self.maintenance_page(&aggregate.categorized)?;
        self.testing_page(bodies.testing.as_deref())?;
        self.known_issues_page(bodies.known_issues.as_deref())?;
        self.contributors_page(&aggregate.contributors)?;
        self.license_page()?;
        self.out.flush()?;
        Ok(())
    }

    pub fn header_page(&mut self) -> Result<()> {
        let month = Utc::now().format("%B %Y").to_string();
        let text = self
            .hb
            .render(
                "header",
                &json!({
                    "product": self.publish.product,
                    "relnum": self.publish.relnum,
                    "author": self.publish.author,
                    "email": self.publish.email,
                    "rev": self.publish.rev,
                    "rev_string": self.publish.rev_string,
                    "month": month,
                }),
            )
            .map_err(RenderError::from)?;
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    pub fn platform_page(&mut self, body: Option<&Path>) -> Result<()> {
        self.prose_page("Platform", "--------", body)
    }

    /// Feature Additions: the feature categories, flattened and deduplicated.
    pub fn features_page(&mut self, categorized: &CategoryReport) -> Result<()> {
        let commits = dedup_by_hash(categorized.collect(&Category::FEATURES));
        self.commit_page("Feature Additions", "-----------------", &commits)
    }

    /// Security Fixes: security-tagged commits from every category.
    pub fn security_page(&mut self, categorized: &CategoryReport) -> Result<()> {
        let commits = dedup_by_hash(categorized.security_commits());
        self.commit_page("Security Fixes", "--------------", &commits)
    }

    /// Maintenance Changes: the maintenance categories, deduplicated.
    pub fn maintenance_page(&mut self, categorized: &CategoryReport) -> Result<()> {
        let commits = dedup_by_hash(categorized.collect(&Category::MAINTENANCE));
        self.commit_page("Maintenance Changes", "-------------------", &commits)
    }

    pub fn testing_page(&mut self, body: Option<&Path>) -> Result<()> {
        self.prose_page("Testing", "-------", body)
    }

    pub fn known_issues_page(&mut self, body: Option<&Path>) -> Result<()> {
        self.prose_page("Known Issues", "------------", body)
    }

    pub fn contributors_page(&mut self, contributors: &BTreeSet<String>) -> Result<()> {
        writeln!(self.out, ":numbered:\nContributors\n------------\n")?;
        for name in contributors {
            writeln!(self.out, "- {}", name)?;
        }
        self.page_break()
    }

    pub fn license_page(&mut self) -> Result<()> {
        let text = self
            .hb
            .render(
                "license",
                &json!({
                    "year": Utc::now().year(),
                    "entity": self.publish.entity,
                    "author": self.publish.author,
                    "email": self.publish.email,
                }),
            )
            .map_err(RenderError::from)?;
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    fn commit_page(&mut self, title: &str, underline: &str, commits: &[CommitRecord]) -> Result<()> {
        writeln!(self.out, ":numbered:\n{}\n{}\n", title, underline)?;
        for commit in commits {
            let line = self
                .hb
                .render(
                    "commit_line",
                    &json!({
                        "forge": self.commit_base,
                        "repo": commit.repo,
                        "hash": commit.hash,
                        "short": &commit.hash[..8.min(commit.hash.len())],
                        "subject": commit.subject,
                        "issues": commit.issue_keys,
                        "browse": self.browse_base,
                    }),
                )
                .map_err(RenderError::from)?;
            self.out.write_all(line.as_bytes())?;
        }
        self.page_break()
    }

    fn prose_page(&mut self, title: &str, underline: &str, body: Option<&Path>) -> Result<()> {
        writeln!(self.out, ":numbered:\n{}\n{}\n", title, underline)?;
        if let Some(path) = body {
            let text = std::fs::read_to_string(path).map_err(|e| {
                RenderError::BodyUnreadable {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?;
            self.out.write_all(text.as_bytes())?;
        }
        self.page_break()
    }

    fn page_break(&mut self) -> Result<()> {
        writeln!(self.out, "\n<<<\n")?;
        Ok(())
    }
}

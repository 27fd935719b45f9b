// SPDX-License-Identifier: MIT

//! Error types for the relgen application.
//!
//! This module defines all error types used throughout the application,
//! with proper error categorization and context propagation.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for relgen operations.
#[derive(Error, Debug)]
pub enum RelError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Issue tracker errors
    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),

    // Repository bootstrap errors
    #[error("Bootstrap error: {0}")]
    Bootstrap(#[from] BootstrapError),

    // Release aggregation errors
    #[error("Release error: {0}")]
    Release(#[from] ReleaseError),

    // Document rendering errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read configuration: {path}: {message}")]
    ReadError { path: PathBuf, message: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {path}")]
    NotARepository { path: PathBuf },

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Invalid message encoding in commit {hash}")]
    InvalidEncoding { hash: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    #[error("Cherry diff failed for {repo}: {message}")]
    CherryFailed { repo: String, message: String },
}

/// Issue-tracker errors. These are tolerated at the lookup boundary and
/// never propagate past it; they exist so the boundary can log precisely.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Request failed for {key}: {message}")]
    RequestFailed { key: String, message: String },

    #[error("Tracker returned status {status} for {key}")]
    BadStatus { key: String, status: u16 },

    #[error("Malformed issue payload for {key}: {message}")]
    MalformedPayload { key: String, message: String },

    #[error("Unknown issue type: '{name}'")]
    UnknownIssueType { name: String },
}

/// Repository bootstrap errors.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Failed to retrieve repository list from {url}: {message}")]
    ListFailed { url: String, message: String },

    #[error("No tag or head '{reference}' for repository {repo}")]
    MissingReference { repo: String, reference: String },

    #[error("Failed to mirror repository {url}: {message}")]
    MirrorFailed { url: String, message: String },
}

/// Release aggregation errors.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("No repository produced commits between {previous} and {new}")]
    NothingToRelease { previous: String, new: String },

    #[error("No repository has both references {previous} and {new}")]
    NoUsableRepositories { previous: String, new: String },
}

/// Document rendering errors.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write document: {message}")]
    WriteFailed { message: String },

    #[error("Template error: {message}")]
    TemplateFailed { message: String },

    #[error("Failed to read section body {path}: {message}")]
    BodyUnreadable { path: PathBuf, message: String },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

impl From<handlebars::RenderError> for RenderError {
    fn from(err: handlebars::RenderError) -> Self {
        RenderError::TemplateFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias for relgen operations.
pub type Result<T> = std::result::Result<T, RelError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| RelError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

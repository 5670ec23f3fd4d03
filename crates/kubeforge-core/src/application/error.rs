//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, ForgeError};

/// Errors that occur while executing builders or workflows.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A `Creator` with the `Error` policy hit an existing file.
    #[error("File already exists: {path}")]
    FileAlreadyExists { path: PathBuf },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// In-memory backend lock was poisoned.
    #[error("Filesystem store lock poisoned")]
    StoreLockError,

    /// A builder failed; wraps the underlying cause.
    #[error("Builder '{builder}' failed for {path}: {source}")]
    BuilderFailed {
        builder: String,
        path: PathBuf,
        #[source]
        source: Box<ForgeError>,
    },

    /// `init` target holds files other than dotfiles, docs and Cargo manifests.
    #[error("Target directory {path} is not empty (found: {})", .entries.join(", "))]
    DirectoryNotEmpty { path: PathBuf, entries: Vec<String> },

    /// `create api` needs an initialised project.
    #[error("Missing entrypoint {path}: run `kubeforge init` first")]
    MissingEntrypoint { path: PathBuf },

    #[error("No resource given for this operation")]
    MissingResource,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FileAlreadyExists { path } => vec![
                format!("{} was generated before", path.display()),
                "Pass --force to regenerate it (destructive)".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::BuilderFailed { source, .. } => source.suggestions(),
            Self::DirectoryNotEmpty { .. } => vec![
                "Run init in an empty directory".into(),
                "Dotfiles, *.md files and Cargo.toml/Cargo.lock are allowed".into(),
            ],
            Self::MissingEntrypoint { .. } => vec![
                "Run `kubeforge init` in this directory first".into(),
                "Or point at the project with --dir".into(),
            ],
            Self::MissingResource => vec!["Provide --group, --version and --kind".into()],
            Self::StoreLockError => vec!["Try again in a moment".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileAlreadyExists { .. } | Self::DirectoryNotEmpty { .. } => {
                ErrorCategory::Validation
            }
            Self::FileNotFound { .. } | Self::MissingEntrypoint { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::BuilderFailed { source, .. } => source.category(),
            Self::MissingResource | Self::ValidationFailed(_) => ErrorCategory::Validation,
        }
    }
}

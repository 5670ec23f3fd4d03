//! Error handling for the Kubeforge CLI.
//!
//! Every failure ends up as a [`CliError`]. Its [`ErrorCategory`] picks the
//! headline and the exit code; core errors keep the category and hints the
//! core assigned them.

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use kubeforge_core::error::{ErrorCategory as CoreCategory, ForgeError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Flags or prompt answers that cannot be used.
    #[error("{message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// A configuration file could not be read, parsed, or written.
    #[error("{message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// Raised by `kubeforge-core`; hints and category come from there.
    #[error(transparent)]
    Core(#[from] ForgeError),

    #[error("{message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation cancelled")]
    Cancelled,

    /// Prompting in a build without the `interactive` feature.
    #[error("'{feature}' support is not compiled in")]
    FeatureNotAvailable { feature: &'static str },

    #[error("`{command}` failed")]
    ExternalCommandFailed {
        command: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => {
                vec!["Run the command with --help to see the accepted values".into()]
            }
            Self::ConfigError { .. } => vec![
                "Run 'kubeforge config path' to locate the config file".into(),
                "Use 'kubeforge config init --force' to reset it to the defaults".into(),
            ],
            Self::Core(core_err) => core_err.suggestions(),
            Self::IoError { .. } => vec![
                "Check permissions on the project directory".into(),
                "Point at another directory with --dir".into(),
            ],
            Self::Cancelled => vec!["No files were written".into()],
            Self::FeatureNotAvailable { feature } => vec![
                "Pass --resource/--controller explicitly, or --yes to accept the defaults".into(),
                format!("Or reinstall with: cargo install kubeforge-cli --features {feature}"),
            ],
            Self::ExternalCommandFailed { command, .. } => vec![format!(
                "Check that `{command}` runs in the project directory"
            )],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::Cancelled => ErrorCategory::UserError,
            Self::ConfigError { .. } | Self::FeatureNotAvailable { .. } => {
                ErrorCategory::Configuration
            }
            Self::Core(core) => core.category().into(),
            Self::IoError { .. } | Self::ExternalCommandFailed { .. } => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    fn headline(&self) -> &'static str {
        match self {
            Self::Cancelled => "Cancelled",
            _ => self.category().label(),
        }
    }

    /// Display text without a leading copy of the headline, which core
    /// configuration and internal errors carry.
    fn message(&self) -> String {
        let message = self.to_string();
        match message.strip_prefix(self.headline()) {
            Some(rest) if rest.starts_with(": ") => rest[2..].to_string(),
            _ => message,
        }
    }

    /// Messages of the source chain. A link whose message equals the one
    /// above it, as with `#[from]` wrappers, is skipped.
    fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut previous = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            let message = err.to_string();
            if message != previous {
                causes.push(message.clone());
            }
            previous = message;
            source = err.source();
        }
        causes
    }

    /// The full report printed on stderr.
    ///
    /// ```text
    /// ✗ Invalid input: API ship/v1, Kind=Frigate already exists
    ///
    /// Hints:
    ///   • Pass --force to regenerate its files (destructive)
    /// ```
    pub fn render(&self, verbose: bool, colored: bool) -> String {
        let mut out = String::new();

        let headline = format!("\u{2717} {}:", self.headline());
        let message = self.message();
        if colored {
            out.push_str(&format!("\n{} {}\n", headline.red().bold(), message.red()));
        } else {
            out.push_str(&format!("\n{headline} {message}\n"));
        }

        let causes = self.causes();
        if verbose {
            for cause in &causes {
                let line = format!("  Caused by: {cause}");
                if colored {
                    out.push_str(&format!("{}\n", line.dimmed()));
                } else {
                    out.push_str(&format!("{line}\n"));
                }
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            if colored {
                out.push_str(&format!("\n{}\n", "Hints:".yellow().bold()));
            } else {
                out.push_str("\nHints:\n");
            }
            for suggestion in suggestions {
                out.push_str(&format!("  \u{2022} {suggestion}\n"));
            }
        }

        if !verbose && !causes.is_empty() {
            out.push_str("\nUse -v / --verbose to see the underlying cause.\n");
        }

        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(exit_code = self.exit_code(), "{}: {}", self.headline(), self)
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(exit_code = self.exit_code(), "{}: {}", self.headline(), self)
            }
        }
        for cause in self.causes() {
            tracing::debug!("Caused by: {cause}");
        }
    }
}

/// Error categories as the CLI reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad flags, resource identifiers or project state the user can fix.
    UserError,
    /// `create api` outside an initialised project.
    NotFound,
    Configuration,
    Internal,
}

impl ErrorCategory {
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(self) -> u8 {
        match self {
            Self::UserError => 2,
            Self::NotFound => 3,
            Self::Configuration => 4,
            Self::Internal => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::UserError => "Invalid input",
            Self::NotFound => "Not found",
            Self::Configuration => "Configuration error",
            Self::Internal => "Internal error",
        }
    }
}

impl From<CoreCategory> for ErrorCategory {
    fn from(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Validation | CoreCategory::Compatibility => Self::UserError,
            CoreCategory::NotFound => Self::NotFound,
            CoreCategory::Configuration => Self::Configuration,
            CoreCategory::Internal => Self::Internal,
        }
    }
}

/// Attach a message to an I/O failure at the call-site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: format!("{}: {e}", f().into()),
            source: e,
        })
    }
}

// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep them per builder)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Marker Errors
    // ========================================================================
    #[error(
        "unknown file extension: '{extension}', expected one of: {}",
        quote_all(.supported)
    )]
    UnsupportedExtension {
        extension: String,
        supported: Vec<String>,
    },

    #[error("Invalid marker value {value:?}: {reason}")]
    InvalidMarkerValue { value: String, reason: &'static str },

    #[error("Invalid marker prefix {prefix:?}: it has no name between '+' and ':'")]
    InvalidMarkerPrefix { prefix: String },

    // ========================================================================
    // Rendering Errors
    // ========================================================================
    #[error("Failed to render template '{template}': variable '{variable}' is not defined")]
    TemplateRender { template: String, variable: String },

    // ========================================================================
    // Project Record Errors
    // ========================================================================
    #[error("Malformed project file: {reason}")]
    InvalidProjectFile { reason: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid resource: {field} '{value}' {reason}")]
    InvalidResource {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Project name ({name}) is invalid: {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Domain ({domain}) is invalid: {reason}")]
    InvalidDomain { domain: String, reason: String },

    #[error("API {resource} already exists")]
    ApiAlreadyExists { resource: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Unknown license '{license}', expected one of: apache2, none")]
    UnknownLicense { license: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

fn quote_all(items: &[String]) -> String {
    items
        .iter()
        .map(|s| format!("{s:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnsupportedExtension { supported, .. } => vec![
                format!("Markers can only be placed in: {}", supported.join(", ")),
                "Register the extension's comment token in the CommentSyntaxRegistry".into(),
            ],
            Self::TemplateRender { variable, .. } => vec![
                format!("The template expects '{{{{{variable}}}}}' to be set"),
                "Check that the scaffold session provides every required field".into(),
            ],
            Self::InvalidResource { field, .. } => match *field {
                "group" => vec![
                    "Groups are lowercase DNS subdomains, e.g. 'ship' or 'cache.example.com'".into(),
                ],
                "version" => vec!["Versions look like v1, v1alpha1 or v2beta3".into()],
                "kind" => vec!["Kinds are PascalCase identifiers, e.g. 'Frigate'".into()],
                _ => vec!["Check the resource definition".into()],
            },
            Self::InvalidProjectName { .. } => vec![
                "Project names must be valid DNS-1123 labels".into(),
                "Use lowercase letters, digits and '-', e.g. 'memcached-operator'".into(),
            ],
            Self::InvalidDomain { .. } => vec![
                "Domains are lowercase DNS subdomains, e.g. 'my.domain' or 'example.com'".into(),
            ],
            Self::ApiAlreadyExists { .. } => vec![
                "The PROJECT file already records this API".into(),
                "Pass --force to regenerate its files (destructive)".into(),
                "Or pass --resource=false to add only a controller".into(),
            ],
            Self::InvalidProjectFile { .. } => vec![
                "Fix the PROJECT file by hand, or delete it to have it rebuilt".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidResource { .. }
            | Self::InvalidProjectName { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::UnknownLicense { .. }
            | Self::MissingRequiredField { .. }
            | Self::InvalidDomain { .. }
            | Self::ApiAlreadyExists { .. }
            | Self::InvalidProjectFile { .. } => ErrorCategory::Validation,
            Self::UnsupportedExtension { .. }
            | Self::InvalidMarkerValue { .. }
            | Self::InvalidMarkerPrefix { .. } => {
                ErrorCategory::Compatibility
            }
            Self::TemplateRender { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}

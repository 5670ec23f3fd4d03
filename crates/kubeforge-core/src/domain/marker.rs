//! Scaffold markers.
//!
//! A marker is a single comment line that acts as a stable anchor for future
//! code insertions:
//!
//! ```text
//! // +kubebuilder:scaffold:imports
//! # +kubebuilder:scaffold:resources
//! ```
//!
//! The comment token is chosen from the file extension through an explicit
//! [`CommentSyntaxRegistry`]. The rendered line format is a durable contract:
//! files written by earlier runs must keep matching.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

use crate::domain::error::DomainError;

/// Prefix used by every marker the built-in templates emit.
pub const DEFAULT_PREFIX: &str = "+kubebuilder:scaffold:";

/// Immutable mapping from file extension to line-comment token.
///
/// The registry is a plain value: build one, pass it to [`Marker::new`], drop
/// it. Extending it produces a new registry rather than mutating shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSyntaxRegistry {
    comments: BTreeMap<String, String>,
}

impl CommentSyntaxRegistry {
    /// A registry with no extensions registered.
    pub fn empty() -> Self {
        Self {
            comments: BTreeMap::new(),
        }
    }

    /// Return a copy of this registry with one more extension registered.
    ///
    /// The extension may be given with or without the leading dot.
    pub fn with_extension(mut self, extension: &str, comment: &str) -> Self {
        let ext = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{extension}")
        };
        self.comments.insert(ext, comment.trim().to_string());
        self
    }

    /// Comment token for a path, if its extension is registered.
    pub fn comment_for(&self, path: &Path) -> Option<&str> {
        self.comments.get(&extension_of(path)).map(String::as_str)
    }

    /// Registered extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<String> {
        self.comments.keys().cloned().collect()
    }

    /// Shorthand for [`Marker::new`] against this registry.
    pub fn marker_for(
        &self,
        path: impl AsRef<Path>,
        value: impl Into<String>,
    ) -> Result<Marker, DomainError> {
        Marker::new(self, path, value)
    }
}

impl Default for CommentSyntaxRegistry {
    fn default() -> Self {
        Self::empty()
            .with_extension(".go", "//")
            .with_extension(".rs", "//")
            .with_extension(".yaml", "#")
            .with_extension(".yml", "#")
    }
}

/// A single addressable insertion point.
///
/// Two markers are equal iff their rendered lines are equal.
#[derive(Debug, Clone)]
pub struct Marker {
    prefix: String,
    comment: String,
    value: String,
}

impl Marker {
    /// Create a marker with the [`DEFAULT_PREFIX`] for the given file.
    ///
    /// # Errors
    ///
    /// `UnsupportedExtension` if the registry has no comment token for the
    /// extension; the error lists every supported extension.
    pub fn new(
        registry: &CommentSyntaxRegistry,
        path: impl AsRef<Path>,
        value: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::with_prefix(registry, DEFAULT_PREFIX, path, value)
    }

    /// Create a marker with a custom prefix.
    ///
    /// The prefix is normalised to start with exactly one `+` and end with
    /// exactly one `:`. Surrounding whitespace is trimmed from the value:
    /// [`Self::matches_line`] compares trimmed lines, so a padded value could
    /// never be found again.
    ///
    /// # Errors
    ///
    /// `InvalidMarkerValue` for an empty or multi-line value,
    /// `InvalidMarkerPrefix` when nothing is left of the prefix once `+`
    /// and `:` are stripped, and `UnsupportedExtension` as for [`Self::new`].
    pub fn with_prefix(
        registry: &CommentSyntaxRegistry,
        prefix: &str,
        path: impl AsRef<Path>,
        value: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let value = value.into();

        if value.contains('\n') || value.contains('\r') {
            return Err(DomainError::InvalidMarkerValue {
                value,
                reason: "markers cannot span lines",
            });
        }
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(DomainError::InvalidMarkerValue {
                value,
                reason: "must not be empty",
            });
        }
        let prefix = normalize_prefix(prefix).ok_or_else(|| DomainError::InvalidMarkerPrefix {
            prefix: prefix.to_string(),
        })?;

        let comment = registry
            .comment_for(path)
            .ok_or_else(|| DomainError::UnsupportedExtension {
                extension: extension_of(path),
                supported: registry.supported_extensions(),
            })?;

        Ok(Self {
            prefix,
            comment: comment.to_string(),
            value,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check whether a file line is this marker.
    ///
    /// Surrounding whitespace and the comment token are ignored, so an
    /// indented marker still matches.
    pub fn matches_line(&self, line: &str) -> bool {
        let trimmed = line.trim();
        let body = trimmed.strip_prefix(self.comment.as_str()).unwrap_or(trimmed);
        let body = body.trim();

        body.strip_prefix(self.prefix.as_str()) == Some(self.value.as_str())
    }

    fn rendered(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.comment, self.prefix, self.value)
    }
}

impl PartialEq for Marker {
    fn eq(&self, other: &Self) -> bool {
        self.rendered() == other.rendered()
    }
}

impl Eq for Marker {}

impl Hash for Marker {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rendered().hash(state);
    }
}

impl PartialOrd for Marker {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Marker {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rendered().cmp(&other.rendered())
    }
}

fn normalize_prefix(prefix: &str) -> Option<String> {
    let core = prefix
        .trim()
        .trim_start_matches('+')
        .trim_end_matches(':');
    (!core.is_empty()).then(|| format!("+{core}:"))
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}

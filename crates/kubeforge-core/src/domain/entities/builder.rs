//! Builders: the units of work a scaffold run applies in order.
//!
//! ```text
//! Builder
//! ├── Creator   whole-file body + IfExistsAction
//! └── Inserter  markers + fragment rules; patches the file, creates it if absent
//! ```
//!
//! Paths and bodies are templates. They are rendered against the session
//! variables merged with the builder's own `variables` right before the
//! builder executes.

use std::collections::BTreeMap;
use std::fmt;

use super::common::Permissions;
use super::resource::Resource;
use crate::domain::fragments::{CodeFragments, Feature, FeatureSet, FragmentRule, resolve_fragments};
use crate::domain::marker::Marker;

/// What a `Creator` does when its target already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IfExistsAction {
    /// Leave the existing file alone.
    Skip,
    /// Fail this builder with `FileAlreadyExists`.
    Error,
    /// Replace the file with the rendered body.
    Overwrite,
}

impl fmt::Display for IfExistsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Skip => "skip",
            Self::Error => "error",
            Self::Overwrite => "overwrite",
        };
        f.write_str(s)
    }
}

/// Writes a whole file.
#[derive(Debug, Clone)]
pub struct Creator {
    name: String,
    default_path: String,
    path: Option<String>,
    body: String,
    if_exists: IfExistsAction,
    permissions: Permissions,
    variables: BTreeMap<String, String>,
}

impl Creator {
    /// A creator with `Skip` policy and read-write permissions.
    pub fn new(
        name: impl Into<String>,
        default_path: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            default_path: default_path.into(),
            path: None,
            body: body.into(),
            if_exists: IfExistsAction::Skip,
            permissions: Permissions::read_write(),
            variables: BTreeMap::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn if_exists(mut self, action: IfExistsAction) -> Self {
        self.if_exists = action;
        self
    }

    pub fn executable(mut self) -> Self {
        self.permissions = Permissions::executable();
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Expose a marker's rendered line to the body as `{{key}}`.
    pub fn with_marker(self, key: impl Into<String>, marker: &Marker) -> Self {
        self.with_variable(key, marker.to_string())
    }

    pub fn if_exists_action(&self) -> IfExistsAction {
        self.if_exists
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Inserts code fragments above markers in an existing file.
#[derive(Debug, Clone)]
pub struct Inserter {
    name: String,
    default_path: String,
    path: Option<String>,
    markers: Vec<Marker>,
    rules: Vec<FragmentRule>,
    features: FeatureSet,
    skeleton: Option<String>,
    permissions: Permissions,
    variables: BTreeMap<String, String>,
}

impl Inserter {
    pub fn new(name: impl Into<String>, default_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_path: default_path.into(),
            path: None,
            markers: Vec::new(),
            rules: Vec::new(),
            features: FeatureSet::new(),
            skeleton: None,
            permissions: Permissions::read_write(),
            variables: BTreeMap::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Own a marker. Owning the same marker twice has no extra effect.
    pub fn marker(mut self, marker: Marker) -> Self {
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }

    /// Contribute `render(resource)` above `marker` when `feature` is enabled.
    pub fn rule(mut self, marker: Marker, feature: Feature, render: fn(&Resource) -> String) -> Self {
        self = self.marker(marker.clone());
        self.rules.push(FragmentRule::new(marker, feature, render));
        self
    }

    pub fn features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    /// Body used when the file does not exist yet.
    pub fn skeleton(mut self, skeleton: impl Into<String>) -> Self {
        self.skeleton = Some(skeleton.into());
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn rules(&self) -> &[FragmentRule] {
        &self.rules
    }

    pub fn enabled_features(&self) -> &FeatureSet {
        &self.features
    }

    /// Skeleton template for a first scaffold.
    ///
    /// Without an explicit skeleton this is the marker lines, one per line.
    pub fn skeleton_template(&self) -> String {
        match &self.skeleton {
            Some(skeleton) => skeleton.clone(),
            None => {
                let mut out = self
                    .markers
                    .iter()
                    .map(Marker::to_string)
                    .collect::<Vec<_>>()
                    .join("\n");
                out.push('\n');
                out
            }
        }
    }

    /// Fragments for this invocation; empty when there is no resource.
    pub fn fragments(&self, resource: Option<&Resource>) -> CodeFragments {
        resolve_fragments(&self.features, &self.markers, &self.rules, resource)
    }
}

/// A unit of scaffold work.
#[derive(Debug, Clone)]
pub enum Builder {
    Creator(Creator),
    Inserter(Inserter),
}

impl Builder {
    pub fn name(&self) -> &str {
        match self {
            Self::Creator(c) => &c.name,
            Self::Inserter(i) => &i.name,
        }
    }

    /// Path template: the explicit path if one was set, else the default.
    pub fn path_template(&self) -> &str {
        let (path, default) = match self {
            Self::Creator(c) => (&c.path, &c.default_path),
            Self::Inserter(i) => (&i.path, &i.default_path),
        };
        path.as_deref().unwrap_or(default)
    }

    /// Body template written when the file is created.
    pub fn body(&self) -> String {
        match self {
            Self::Creator(c) => c.body.clone(),
            Self::Inserter(i) => i.skeleton_template(),
        }
    }

    pub fn permissions(&self) -> Permissions {
        match self {
            Self::Creator(c) => c.permissions,
            Self::Inserter(i) => i.permissions,
        }
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        match self {
            Self::Creator(c) => &c.variables,
            Self::Inserter(i) => &i.variables,
        }
    }

    pub fn is_inserter(&self) -> bool {
        matches!(self, Self::Inserter(_))
    }

    pub fn as_inserter(&self) -> Option<&Inserter> {
        match self {
            Self::Inserter(i) => Some(i),
            Self::Creator(_) => None,
        }
    }

    pub fn as_creator(&self) -> Option<&Creator> {
        match self {
            Self::Creator(c) => Some(c),
            Self::Inserter(_) => None,
        }
    }
}

impl From<Creator> for Builder {
    fn from(creator: Creator) -> Self {
        Self::Creator(creator)
    }
}

impl From<Inserter> for Builder {
    fn from(inserter: Inserter) -> Self {
        Self::Inserter(inserter)
    }
}

//! The `PROJECT` record kept at the root of every scaffolded operator.
//!
//! `init` writes it with the project name and domain; every successful
//! `create api` records the resource and what was generated for it. Later
//! runs consult it to refuse re-creating an API that already exists.

use serde::{Deserialize, Serialize};

use super::resource::{Resource, is_dns_subdomain};
use super::session::validate_project_name;
use crate::domain::error::DomainError;
use crate::domain::fragments::{Feature, FeatureSet};

/// File name, relative to the project root.
pub const PROJECT_FILE: &str = "PROJECT";

pub const DEFAULT_DOMAIN: &str = "my.domain";

/// Layout key of projects generated by this tool.
pub const PROJECT_LAYOUT: &str = "rust/v1alpha";

const RECORD_VERSION: &str = "3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub version: String,
    pub domain: String,
    pub project_name: String,
    #[serde(default)]
    pub layout: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceRecord>,
}

/// One group/version/kind and what has been scaffolded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub domain: String,
    #[serde(default)]
    pub controller: bool,
    /// Present once the types file was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRecord {
    pub namespaced: bool,
}

impl ResourceRecord {
    fn is(&self, resource: &Resource) -> bool {
        self.group == resource.group && self.version == resource.version && self.kind == resource.kind
    }

    pub fn has_api(&self) -> bool {
        self.api.is_some()
    }
}

impl ProjectConfig {
    /// # Errors
    ///
    /// `InvalidProjectName` or `InvalidDomain`.
    pub fn new(project_name: impl Into<String>, domain: impl Into<String>) -> Result<Self, DomainError> {
        let project_name = project_name.into();
        let domain = domain.into();
        validate_project_name(&project_name)?;
        is_dns_subdomain(&domain).map_err(|reason| DomainError::InvalidDomain {
            domain: domain.clone(),
            reason,
        })?;

        Ok(Self {
            version: RECORD_VERSION.to_string(),
            domain,
            project_name,
            layout: vec![PROJECT_LAYOUT.to_string()],
            resources: Vec::new(),
        })
    }

    pub fn resource(&self, resource: &Resource) -> Option<&ResourceRecord> {
        self.resources.iter().find(|r| r.is(resource))
    }

    /// Whether the types file of `resource` was already scaffolded.
    pub fn has_api(&self, resource: &Resource) -> bool {
        self.resource(resource).is_some_and(ResourceRecord::has_api)
    }

    /// Record what a `create api` run generated. Existing entries only gain
    /// features; a controller-only run never drops a recorded API.
    pub fn update_resource(&mut self, resource: &Resource, features: &FeatureSet) {
        let api = features.contains(Feature::Resource).then_some(ApiRecord {
            namespaced: resource.namespaced,
        });
        let controller = features.contains(Feature::Controller);

        if let Some(record) = self.resources.iter_mut().find(|r| r.is(resource)) {
            record.controller |= controller;
            if api.is_some() {
                record.api = api;
            }
            return;
        }

        self.resources.push(ResourceRecord {
            group: resource.group.clone(),
            version: resource.version.clone(),
            kind: resource.kind.clone(),
            domain: self.domain.clone(),
            controller,
            api,
        });
    }

    /// # Errors
    ///
    /// `InvalidProjectFile` when the text is not a project record.
    pub fn from_toml(text: &str) -> Result<Self, DomainError> {
        toml::from_str(text).map_err(|e| DomainError::InvalidProjectFile {
            reason: e.message().to_string(),
        })
    }

    pub fn to_toml(&self) -> Result<String, DomainError> {
        toml::to_string(self).map_err(|e| DomainError::InvalidProjectFile {
            reason: e.to_string(),
        })
    }
}

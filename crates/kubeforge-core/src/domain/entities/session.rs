//! Transient substitution data for one scaffold invocation.

use std::collections::BTreeMap;

use chrono::Datelike;

use super::resource::{Resource, is_dns_label};
use crate::domain::error::DomainError;

/// Shared data used to render template bodies and paths.
///
/// Built once per invocation and discarded afterwards; nothing here is
/// persisted.
///
/// | Variable | Example |
/// |----------|---------|
/// | `PROJECT_NAME` | `memcached-operator` |
/// | `PROJECT_NAME_SNAKE` | `memcached_operator` |
/// | `OWNER` | `The Kubeforge Authors` |
/// | `YEAR` | `2026` |
/// | `BOILERPLATE` | license header, empty until loaded |
/// | `LICENSE_TEXT` | the header without `/*` and `*/` |
/// | `GROUP`, `VERSION`, `KIND`, `KIND_LOWER`, `NAMESPACED` | only with a resource |
#[derive(Debug, Clone)]
pub struct ScaffoldSession {
    project_name: String,
    resource: Option<Resource>,
    variables: BTreeMap<String, String>,
}

impl ScaffoldSession {
    /// Start a session for a project.
    ///
    /// # Errors
    ///
    /// `InvalidProjectName` unless the name is a DNS-1123 label.
    pub fn new(project_name: impl Into<String>) -> Result<Self, DomainError> {
        let project_name = project_name.into();
        validate_project_name(&project_name)?;

        let mut variables = BTreeMap::new();
        variables.insert("PROJECT_NAME".to_string(), project_name.clone());
        variables.insert(
            "PROJECT_NAME_SNAKE".to_string(),
            project_name.replace('-', "_"),
        );
        variables.insert("OWNER".to_string(), String::new());
        variables.insert(
            "YEAR".to_string(),
            chrono::Local::now().year().to_string(),
        );
        variables.insert("BOILERPLATE".to_string(), String::new());
        variables.insert("LICENSE_TEXT".to_string(), String::new());

        Ok(Self {
            project_name,
            resource: None,
            variables,
        })
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.variables.insert("OWNER".to_string(), owner.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.variables.insert("YEAR".to_string(), year.to_string());
        self
    }

    pub fn with_boilerplate(mut self, boilerplate: impl Into<String>) -> Self {
        self.set_boilerplate(boilerplate);
        self
    }

    /// Attach the resource and expose its identifiers as variables.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.variables
            .insert("GROUP".to_string(), resource.group.clone());
        self.variables
            .insert("VERSION".to_string(), resource.version.clone());
        self.variables
            .insert("KIND".to_string(), resource.kind.clone());
        self.variables
            .insert("KIND_LOWER".to_string(), resource.kind_lower());
        self.variables
            .insert("NAMESPACED".to_string(), resource.namespaced.to_string());
        self.resource = Some(resource);
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Set the license header; `LICENSE_TEXT` gets the same text without
    /// its comment delimiters. Trailing whitespace is dropped from both.
    pub fn set_boilerplate(&mut self, boilerplate: impl Into<String>) {
        let boilerplate = boilerplate.into().trim_end().to_string();
        let text = boilerplate
            .replacen("/*", "", 1)
            .replacen("*/", "", 1)
            .trim()
            .to_string();
        self.variables.insert("LICENSE_TEXT".to_string(), text);
        self.variables.insert("BOILERPLATE".to_string(), boilerplate);
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }
}

pub(crate) fn validate_project_name(name: &str) -> Result<(), DomainError> {
    is_dns_label(name).map_err(|reason| DomainError::InvalidProjectName {
        name: name.to_string(),
        reason,
    })?;

    if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err(DomainError::InvalidProjectName {
            name: name.to_string(),
            reason: "must start with a lowercase letter".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_variables() {
        let session = ScaffoldSession::new("memcached-operator")
            .unwrap()
            .with_owner("Acme")
            .with_year(2024);

        assert_eq!(session.get("PROJECT_NAME"), Some("memcached-operator"));
        assert_eq!(session.get("PROJECT_NAME_SNAKE"), Some("memcached_operator"));
        assert_eq!(session.get("OWNER"), Some("Acme"));
        assert_eq!(session.get("YEAR"), Some("2024"));
        assert_eq!(session.get("BOILERPLATE"), Some(""));
        assert_eq!(session.get("KIND"), None);
        assert!(session.resource().is_none());
    }

    #[test]
    fn default_year_is_current() {
        let session = ScaffoldSession::new("op").unwrap();
        let year: i32 = session.get("YEAR").unwrap().parse().unwrap();
        assert_eq!(year, chrono::Local::now().year());
    }

    #[test]
    fn boilerplate_strips_comment_delimiters() {
        let session = ScaffoldSession::new("op")
            .unwrap()
            .with_boilerplate("/*\nCopyright 2026 Acme.\n*/\n");

        assert_eq!(session.get("BOILERPLATE"), Some("/*\nCopyright 2026 Acme.\n*/"));
        assert_eq!(session.get("LICENSE_TEXT"), Some("Copyright 2026 Acme."));
    }

    #[test]
    fn resource_variables() {
        let session = ScaffoldSession::new("op")
            .unwrap()
            .with_resource(Resource::new("ship", "v1", "Frigate").with_namespaced(false));

        assert_eq!(session.get("GROUP"), Some("ship"));
        assert_eq!(session.get("VERSION"), Some("v1"));
        assert_eq!(session.get("KIND"), Some("Frigate"));
        assert_eq!(session.get("KIND_LOWER"), Some("frigate"));
        assert_eq!(session.get("NAMESPACED"), Some("false"));
    }

    #[test]
    fn rejects_invalid_project_names() {
        for name in ["", "My-Operator", "op_erator", "-op", "op-", "1op"] {
            assert!(
                matches!(
                    ScaffoldSession::new(name),
                    Err(DomainError::InvalidProjectName { .. })
                ),
                "{name:?}"
            );
        }
    }
}

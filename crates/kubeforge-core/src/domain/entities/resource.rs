//! The API resource a `create api` run wires into a project.

use std::fmt;

use crate::domain::error::DomainError;

const MAX_SUBDOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Group/version/kind of a custom resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub namespaced: bool,
}

impl Resource {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
            namespaced: true,
        }
    }

    pub fn with_namespaced(mut self, namespaced: bool) -> Self {
        self.namespaced = namespaced;
        self
    }

    /// Lowercase kind, used in module and file names.
    pub fn kind_lower(&self) -> String {
        self.kind.to_lowercase()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_group(&self.group)?;
        validate_version(&self.version)?;
        validate_kind(&self.kind)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Kind={}", self.group, self.version, self.kind)
    }
}

fn invalid(field: &'static str, value: &str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidResource {
        field,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn validate_group(group: &str) -> Result<(), DomainError> {
    is_dns_subdomain(group).map_err(|reason| invalid("group", group, reason))
}

pub(crate) fn is_dns_subdomain(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".into());
    }
    if value.len() > MAX_SUBDOMAIN_LEN {
        return Err(format!("must be at most {MAX_SUBDOMAIN_LEN} characters"));
    }
    value.split('.').try_for_each(is_dns_label)
}

fn validate_version(version: &str) -> Result<(), DomainError> {
    let reason = "must look like v1, v1alpha1 or v1beta1";

    let rest = version
        .strip_prefix('v')
        .ok_or_else(|| invalid("version", version, reason))?;

    let major_len = rest.chars().take_while(char::is_ascii_digit).count();
    if major_len == 0 || rest.starts_with('0') {
        return Err(invalid("version", version, reason));
    }

    let qualifier = &rest[major_len..];
    if qualifier.is_empty() {
        return Ok(());
    }

    let minor = qualifier
        .strip_prefix("alpha")
        .or_else(|| qualifier.strip_prefix("beta"))
        .ok_or_else(|| invalid("version", version, reason))?;

    if minor.is_empty() || minor.starts_with('0') || !minor.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("version", version, reason));
    }
    Ok(())
}

fn validate_kind(kind: &str) -> Result<(), DomainError> {
    let mut chars = kind.chars();
    match chars.next() {
        None => Err(invalid("kind", kind, "must not be empty")),
        Some(first) if !first.is_ascii_uppercase() => {
            Err(invalid("kind", kind, "must start with an uppercase letter"))
        }
        Some(_) if !chars.all(|c| c.is_ascii_alphanumeric()) => {
            Err(invalid("kind", kind, "must contain only letters and digits"))
        }
        Some(_) => Ok(()),
    }
}

/// DNS-1123 label check shared by groups and project names.
pub(crate) fn is_dns_label(label: &str) -> Result<(), String> {
    if label.is_empty() {
        return Err("contains an empty DNS label".into());
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(format!("labels must be at most {MAX_LABEL_LEN} characters"));
    }
    if !label
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("must consist of lowercase alphanumeric characters or '-'".into());
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err("must start and end with an alphanumeric character".into());
    }
    Ok(())
}

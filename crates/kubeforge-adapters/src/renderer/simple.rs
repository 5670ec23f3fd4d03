//! Simple variable substitution renderer.

use std::collections::BTreeMap;

use kubeforge_core::{application::ports::TemplateRenderer, domain::DomainError, error::ForgeResult};
use tracing::instrument;

/// Renderer replacing `{{NAME}}` placeholders, where `NAME` is made of
/// `A-Z`, `0-9` and `_`.
///
/// - An undefined `NAME` is an error, never an empty string.
/// - Anything else between braces (`{{}}`, `{{ x }}`, `{name}`) is copied
///   verbatim, so Rust format strings in template bodies survive.
/// - Substituted values are not scanned again.
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip(self, template, variables), level = "trace")]
    fn render(
        &self,
        name: &str,
        template: &str,
        variables: &BTreeMap<String, String>,
    ) -> ForgeResult<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];

            let placeholder = after_open
                .find("}}")
                .map(|end| &after_open[..end])
                .filter(|key| is_placeholder_name(key));

            match placeholder {
                Some(key) => {
                    let value = variables.get(key).ok_or_else(|| DomainError::TemplateRender {
                        template: name.to_string(),
                        variable: key.to_string(),
                    })?;
                    out.push_str(value);
                    rest = &after_open[key.len() + 2..];
                }
                None => {
                    // Not a placeholder; keep one brace and rescan from the next.
                    out.push('{');
                    rest = &rest[start + 1..];
                }
            }
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn is_placeholder_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

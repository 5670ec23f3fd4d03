//! The Rust operator project flavour.

use kubeforge_core::{
    application::{ApiOptions, ports::TemplateCatalog},
    domain::{Builder, CommentSyntaxRegistry, License, Resource},
    error::ForgeResult,
};
use tracing::debug;

use crate::templates::{hack, project, resource, src};

/// Builders for a `kube-rs` operator: a tokio entrypoint running one
/// controller per resource, plus a `crdgen` binary that writes the CRDs.
#[derive(Debug, Clone, Default)]
pub struct RustOperatorCatalog {
    registry: CommentSyntaxRegistry,
}

impl RustOperatorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another comment-syntax registry for the markers.
    pub fn with_registry(registry: CommentSyntaxRegistry) -> Self {
        Self { registry }
    }
}

impl TemplateCatalog for RustOperatorCatalog {
    fn boilerplate(&self, license: License) -> ForgeResult<Option<Builder>> {
        Ok(hack::boilerplate(license).map(Builder::from))
    }

    fn project_files(&self) -> ForgeResult<Vec<Builder>> {
        let registry = &self.registry;
        Ok(vec![
            src::main_file(registry)?.into(),
            src::api_file(registry)?.into(),
            src::controller_file(registry)?.into(),
            src::crd_generator_file(registry)?.into(),
            project::cargo_toml().into(),
            project::gitignore().into(),
            project::makefile().into(),
            project::dockerfile().into(),
            project::dockerignore().into(),
            project::readme().into(),
        ])
    }

    fn api_files(&self, resource: &Resource, options: &ApiOptions) -> ForgeResult<Vec<Builder>> {
        let registry = &self.registry;
        let features = options.features();
        let mut builders = Vec::new();

        if options.resource {
            builders.push(resource::types(resource, options.force).into());
            builders.push(src::api_updater(registry, features.clone())?.into());
            builders.push(src::crd_generator_updater(registry, features.clone())?.into());
        }

        if options.controller {
            builders.push(resource::reconciler(options.force).into());
            builders.push(src::controller_updater(registry, features.clone())?.into());
            builders.push(src::main_updater(registry, features)?.into());
        }

        debug!(%resource, builders = builders.len(), "Resolved API builders");
        Ok(builders)
    }
}

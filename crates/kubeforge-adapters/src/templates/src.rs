//! Source files shared by every resource: the entrypoint, the module roots
//! and the CRD generator.
//!
//! Each file comes as a [`Creator`] used by `init` and an [`Inserter`] used
//! by `create api`. Both render the same body, so an inserter that finds its
//! file missing recreates it with every marker in place.

use kubeforge_core::{
    application::ENTRYPOINT_PATH,
    domain::{CommentSyntaxRegistry, Creator, Feature, FeatureSet, Inserter, Resource},
    error::ForgeResult,
};

use super::marker;

const MAIN_RS: &str = include_str!("../../templates/main.rs.tmpl");
const API_RS: &str = include_str!("../../templates/api.rs.tmpl");
const CONTROLLER_RS: &str = include_str!("../../templates/controller.rs.tmpl");
const CRD_GENERATOR_RS: &str = include_str!("../../templates/crd_generator.rs.tmpl");

pub const API_PATH: &str = "src/api.rs";
pub const CONTROLLER_PATH: &str = "src/controller.rs";
pub const CRD_GENERATOR_PATH: &str = "src/crd_generator.rs";

const IMPORTS: &str = "imports";
const RUNNERS: &str = "runners";
const MODULES: &str = "modules";
const WRITERS: &str = "writers";

// ── src/main.rs ───────────────────────────────────────────────────────────────

pub fn main_file(registry: &CommentSyntaxRegistry) -> ForgeResult<Creator> {
    Ok(Creator::new("main", ENTRYPOINT_PATH, MAIN_RS)
        .with_marker("MARKER_IMPORTS", &marker(registry, ENTRYPOINT_PATH, IMPORTS)?)
        .with_marker("MARKER_RUNNERS", &marker(registry, ENTRYPOINT_PATH, RUNNERS)?))
}

/// Registers a controller: imports its reconciler and spawns its runner.
pub fn main_updater(registry: &CommentSyntaxRegistry, features: FeatureSet) -> ForgeResult<Inserter> {
    let imports = marker(registry, ENTRYPOINT_PATH, IMPORTS)?;
    let runners = marker(registry, ENTRYPOINT_PATH, RUNNERS)?;

    Ok(Inserter::new("main-updater", ENTRYPOINT_PATH)
        .skeleton(MAIN_RS)
        .with_variable("MARKER_IMPORTS", imports.to_string())
        .with_variable("MARKER_RUNNERS", runners.to_string())
        .rule(imports, Feature::Controller, reconciler_import)
        .rule(runners, Feature::Controller, controller_runner)
        .features(features))
}

fn reconciler_import(resource: &Resource) -> String {
    format!(
        "use crate::controller::{}_controller::{}Reconciler;",
        resource.kind_lower(),
        resource.kind
    )
}

fn controller_runner(resource: &Resource) -> String {
    format!(
        "tokio::spawn(async {{\n    ControllerRunner::run::<{}Reconciler>().await;\n}}),",
        resource.kind
    )
}

// ── src/api.rs ────────────────────────────────────────────────────────────────

pub fn api_file(registry: &CommentSyntaxRegistry) -> ForgeResult<Creator> {
    Ok(Creator::new("api", API_PATH, API_RS)
        .with_marker("MARKER_MODULES", &marker(registry, API_PATH, MODULES)?))
}

pub fn api_updater(registry: &CommentSyntaxRegistry, features: FeatureSet) -> ForgeResult<Inserter> {
    let modules = marker(registry, API_PATH, MODULES)?;

    Ok(Inserter::new("api-updater", API_PATH)
        .skeleton(API_RS)
        .with_variable("MARKER_MODULES", modules.to_string())
        .rule(modules, Feature::Resource, |r| {
            format!("pub mod {}_types;", r.kind_lower())
        })
        .features(features))
}

// ── src/controller.rs ─────────────────────────────────────────────────────────

pub fn controller_file(registry: &CommentSyntaxRegistry) -> ForgeResult<Creator> {
    Ok(Creator::new("controller", CONTROLLER_PATH, CONTROLLER_RS)
        .with_marker("MARKER_MODULES", &marker(registry, CONTROLLER_PATH, MODULES)?))
}

pub fn controller_updater(
    registry: &CommentSyntaxRegistry,
    features: FeatureSet,
) -> ForgeResult<Inserter> {
    let modules = marker(registry, CONTROLLER_PATH, MODULES)?;

    Ok(Inserter::new("controller-updater", CONTROLLER_PATH)
        .skeleton(CONTROLLER_RS)
        .with_variable("MARKER_MODULES", modules.to_string())
        .rule(modules, Feature::Controller, |r| {
            format!("pub mod {}_controller;", r.kind_lower())
        })
        .features(features))
}

// ── src/crd_generator.rs ──────────────────────────────────────────────────────

pub fn crd_generator_file(registry: &CommentSyntaxRegistry) -> ForgeResult<Creator> {
    Ok(Creator::new("crd-generator", CRD_GENERATOR_PATH, CRD_GENERATOR_RS)
        .with_marker("MARKER_WRITERS", &marker(registry, CRD_GENERATOR_PATH, WRITERS)?))
}

/// Adds one `write_crd_to_yaml` call per resource.
pub fn crd_generator_updater(
    registry: &CommentSyntaxRegistry,
    features: FeatureSet,
) -> ForgeResult<Inserter> {
    let writers = marker(registry, CRD_GENERATOR_PATH, WRITERS)?;

    Ok(Inserter::new("crd-generator-updater", CRD_GENERATOR_PATH)
        .skeleton(CRD_GENERATOR_RS)
        .with_variable("MARKER_WRITERS", writers.to_string())
        .rule(writers, Feature::Resource, |r| {
            format!(
                "write_crd_to_yaml(&api::{}_types::{}::crd());",
                r.kind_lower(),
                r.kind
            )
        })
        .features(features))
}

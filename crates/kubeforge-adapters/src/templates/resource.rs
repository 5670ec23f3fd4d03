//! Per-resource files written by `create api`.

use kubeforge_core::domain::{Creator, Resource};

use super::owned_file_policy;

const TYPES_RS: &str = include_str!("../../templates/types.rs.tmpl");
const RECONCILER_RS: &str = include_str!("../../templates/reconciler.rs.tmpl");

pub const TYPES_PATH: &str = "src/api/{{KIND_LOWER}}_types.rs";
pub const RECONCILER_PATH: &str = "src/controller/{{KIND_LOWER}}_controller.rs";

/// The custom resource definition. `force` replaces an existing file.
pub fn types(resource: &Resource, force: bool) -> Creator {
    let scope = if resource.namespaced {
        "    namespaced,\n"
    } else {
        ""
    };

    Creator::new("types", TYPES_PATH, TYPES_RS)
        .if_exists(owned_file_policy(force))
        .with_variable("SCOPE_ATTRIBUTE", scope)
}

/// A reconciler stub for the resource.
pub fn reconciler(force: bool) -> Creator {
    Creator::new("reconciler", RECONCILER_PATH, RECONCILER_RS).if_exists(owned_file_policy(force))
}

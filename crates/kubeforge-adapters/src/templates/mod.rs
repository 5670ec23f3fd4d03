//! Built-in Rust operator templates.
//!
//! Bodies live in `templates/*.tmpl` at the crate root and are embedded at
//! compile time. Each submodule turns a group of them into [`Builder`]s:
//!
//! | Module       | Files                                                      |
//! |--------------|------------------------------------------------------------|
//! | [`hack`]     | `hack/boilerplate.rs.txt`                                  |
//! | [`src`]      | `src/main.rs`, `src/api.rs`, `src/controller.rs`, `src/crd_generator.rs` |
//! | [`project`]  | `Cargo.toml`, `Makefile`, `Dockerfile`, ignore files, `README.md` |
//! | [`resource`] | `src/api/<kind>_types.rs`, `src/controller/<kind>_controller.rs` |
//!
//! [`Builder`]: kubeforge_core::domain::Builder

pub mod hack;
pub mod project;
pub mod resource;
pub mod src;

use kubeforge_core::{
    domain::{CommentSyntaxRegistry, IfExistsAction, Marker},
    error::ForgeResult,
};

pub(crate) fn marker(
    registry: &CommentSyntaxRegistry,
    path: &str,
    value: &str,
) -> ForgeResult<Marker> {
    Ok(registry.marker_for(path, value)?)
}

/// Policy for files `create api` owns outright.
pub(crate) fn owned_file_policy(force: bool) -> IfExistsAction {
    if force {
        IfExistsAction::Overwrite
    } else {
        IfExistsAction::Error
    }
}

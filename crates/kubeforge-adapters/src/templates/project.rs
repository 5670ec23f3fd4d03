//! Project-level files: manifest, build tooling and docs.

use kubeforge_core::domain::{Creator, IfExistsAction};

const CARGO_TOML: &str = include_str!("../../templates/Cargo.toml.tmpl");
const GITIGNORE: &str = include_str!("../../templates/gitignore.tmpl");
const MAKEFILE: &str = include_str!("../../templates/Makefile.tmpl");
const DOCKERFILE: &str = include_str!("../../templates/Dockerfile.tmpl");
const DOCKERIGNORE: &str = include_str!("../../templates/dockerignore.tmpl");
const README: &str = include_str!("../../templates/README.md.tmpl");

pub fn cargo_toml() -> Creator {
    Creator::new("cargo-toml", "Cargo.toml", CARGO_TOML)
}

pub fn gitignore() -> Creator {
    Creator::new("gitignore", ".gitignore", GITIGNORE)
}

/// Fails when a `Makefile` already exists.
pub fn makefile() -> Creator {
    Creator::new("makefile", "Makefile", MAKEFILE).if_exists(IfExistsAction::Error)
}

pub fn dockerfile() -> Creator {
    Creator::new("dockerfile", "Dockerfile", DOCKERFILE)
}

pub fn dockerignore() -> Creator {
    Creator::new("dockerignore", ".dockerignore", DOCKERIGNORE)
}

pub fn readme() -> Creator {
    Creator::new("readme", "README.md", README)
}

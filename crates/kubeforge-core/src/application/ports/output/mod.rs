//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kubeforge-adapters` crate provides implementations.

use std::collections::BTreeMap;
use std::path::Path;

use crate::application::services::ApiOptions;
use crate::domain::{Builder, License, Permissions, Resource};
use crate::error::ForgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kubeforge_adapters::filesystem::LocalFilesystem` (production)
/// - `kubeforge_adapters::filesystem::MemoryFilesystem` (testing)
///
/// The executor assumes exclusive access to the tree for the duration of a
/// run; implementations need no locking beyond what their own state requires.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    ///
    /// Fails with `FileNotFound` when the path does not exist.
    fn read_file(&self, path: &Path) -> ForgeResult<String>;

    /// Write a whole file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str, permissions: Permissions) -> ForgeResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Names of the direct children of a directory, sorted.
    fn list_dir(&self, path: &Path) -> ForgeResult<Vec<String>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `kubeforge_adapters::renderer::SimpleRenderer` (`{{NAME}}` substitution)
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` against `variables`.
    ///
    /// # Errors
    ///
    /// `TemplateRender` naming `name` and the first undefined variable.
    fn render(
        &self,
        name: &str,
        template: &str,
        variables: &BTreeMap<String, String>,
    ) -> ForgeResult<String>;
}

/// Port for the set of builders a project flavour ships.
///
/// Implemented by:
/// - `kubeforge_adapters::catalog::RustOperatorCatalog`
pub trait TemplateCatalog: Send + Sync {
    /// Builder for the license header file, if the license has one.
    fn boilerplate(&self, license: License) -> ForgeResult<Option<Builder>>;

    /// Builders for `init`, in execution order.
    fn project_files(&self) -> ForgeResult<Vec<Builder>>;

    /// Builders for `create api`, in execution order.
    fn api_files(&self, resource: &Resource, options: &ApiOptions) -> ForgeResult<Vec<Builder>>;
}

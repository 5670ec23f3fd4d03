//! Command handlers, one module per subcommand.

use std::path::Path;

use kubeforge_adapters::{LocalFilesystem, RustOperatorCatalog, SimpleRenderer};
use kubeforge_core::prelude::ProjectService;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

pub mod completions;
pub mod config;
pub mod create;
pub mod init;

/// The project workflows wired to the local disk and the built-in templates.
pub(crate) fn project_service(config: &AppConfig) -> ProjectService {
    ProjectService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(SimpleRenderer::new()),
        Box::new(RustOperatorCatalog::new()),
    )
    .with_fail_fast(config.scaffold.fail_fast)
}

/// Lower-cased name of the project directory.
fn dir_project_name(root: &Path) -> CliResult<String> {
    let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| CliError::InvalidInput {
            message: format!(
                "cannot derive a project name from '{}', pass --project-name",
                root.display()
            ),
            source: None,
        })
}

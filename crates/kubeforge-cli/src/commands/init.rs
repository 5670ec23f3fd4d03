//! `kubeforge init`: lay out a new operator project.

use tracing::{info, instrument};

use kubeforge_core::{
    application::InitOptions,
    domain::{License, ScaffoldSession},
    error::ForgeError,
};

use crate::{
    cli::{GlobalArgs, InitArgs},
    commands::{dir_project_name, project_service},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = global
        .project_dir()
        .with_cli_context(|| "Failed to resolve the project directory")?;

    let project_name = match args.project_name {
        Some(name) => name,
        None => dir_project_name(&root)?,
    };
    let license = args
        .license
        .as_deref()
        .unwrap_or(&config.defaults.license)
        .parse::<License>()
        .map_err(ForgeError::from)?;

    let mut session = ScaffoldSession::new(&project_name).map_err(ForgeError::from)?;
    if let Some(owner) = args.owner.or(config.defaults.owner.clone()) {
        session = session.with_owner(owner);
    }

    let options = InitOptions {
        license,
        domain: args.domain.unwrap_or_else(|| config.defaults.domain.clone()),
    };

    output.header(&format!("Initialising '{project_name}' in {}", root.display()))?;
    info!(project = %project_name, %license, domain = %options.domain, "Init started");

    let report = project_service(&config).init(&root, session, &options)?;
    output.report(&report)?;
    report.into_result()?;

    output.success(&format!("Project '{project_name}' initialised"))?;
    output.print("")?;
    output.print("Next: define a resource with:")?;
    output.print("$ kubeforge create api")?;

    Ok(())
}

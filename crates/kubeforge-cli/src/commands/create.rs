//! `kubeforge create api`: scaffold a resource and/or controller.
//!
//! Translates flags (and prompt answers) into `ApiOptions`, runs the core
//! workflow, then formats the generated code with `cargo fmt`.

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, instrument, warn};

use kubeforge_core::{
    application::ApiOptions,
    domain::{PROJECT_FILE, ProjectConfig, Resource, ScaffoldSession},
    error::ForgeError,
};

use crate::{
    cli::{ApiArgs, CreateCommands, GlobalArgs},
    commands::{dir_project_name, project_service},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(
    cmd: CreateCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        CreateCommands::Api(args) => create_api(args, global, config, output),
    }
}

#[instrument(skip_all, fields(kind = %args.kind))]
fn create_api(
    args: ApiArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = global
        .project_dir()
        .with_cli_context(|| "Failed to resolve the project directory")?;

    let prompt = output.is_interactive() && !args.yes;
    let options = ApiOptions {
        resource: choose(args.resource, "Create Resource", prompt)?,
        controller: choose(args.controller, "Create Controller", prompt)?,
        force: args.force,
    };
    debug!(?options, "API options resolved");

    let resource =
        Resource::new(&args.group, &args.version, &args.kind).with_namespaced(args.namespaced);
    let session = ScaffoldSession::new(project_name(&root)?)
        .map_err(ForgeError::from)?
        .with_resource(resource);

    output.header(&format!(
        "Creating {}/{}, Kind={}",
        args.group, args.version, args.kind
    ))?;

    let report = project_service(&config).create_api(&root, session, &options)?;
    output.report(&report)?;
    report.into_result()?;
    info!("API created");

    if !args.no_fmt && config.scaffold.run_fmt {
        if let Err(e) = run_cargo_fmt(&root, &output) {
            warn!(error = %e, "Formatting failed");
            output.warning(&format!("{e}; generated code was left unformatted"))?;
        }
    }

    if options.resource {
        output.print("")?;
        output.print("Next: implement your new API and generate the CRDs with:")?;
        output.print("$ make generate-crds")?;
    }

    Ok(())
}

/// The flag if given, otherwise the prompt answer, otherwise yes.
fn choose(flag: Option<bool>, question: &str, prompt: bool) -> CliResult<bool> {
    match flag {
        Some(value) => Ok(value),
        None if prompt => ask(question),
        None => Ok(true),
    }
}

#[cfg(feature = "interactive")]
fn ask(question: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(true)
        .interact()
        .map_err(|e| match e {
            dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
                CliError::Cancelled
            }
            other => CliError::InvalidInput {
                message: format!("no answer to '{question}'"),
                source: Some(Box::new(other)),
            },
        })
}

#[cfg(not(feature = "interactive"))]
fn ask(_question: &str) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// Project name recorded in `PROJECT`, else the package name from
/// `Cargo.toml` with `_` read as `-`, else the directory name.
///
/// A malformed `PROJECT` is left for the core to report.
fn project_name(root: &Path) -> CliResult<String> {
    if let Ok(text) = std::fs::read_to_string(root.join(PROJECT_FILE)) {
        if let Ok(project) = ProjectConfig::from_toml(&text) {
            return Ok(project.project_name);
        }
    }

    let manifest = root.join("Cargo.toml");
    if let Ok(text) = std::fs::read_to_string(&manifest) {
        let table: toml::Table = toml::from_str(&text).map_err(|e| CliError::InvalidInput {
            message: format!("{} is not valid TOML", manifest.display()),
            source: Some(Box::new(e)),
        })?;
        if let Some(name) = table
            .get("package")
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
        {
            return Ok(name.replace('_', "-").to_lowercase());
        }
    }

    dir_project_name(root)
}

fn run_cargo_fmt(root: &Path, output: &OutputManager) -> CliResult<()> {
    let spinner = output.is_interactive().then(|| {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message("Running cargo fmt");
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    });

    let result = Command::new("cargo").arg("fmt").current_dir(root).output();

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let out = result.map_err(|e| CliError::ExternalCommandFailed {
        command: "cargo fmt".into(),
        source: Some(Box::new(e)),
    })?;
    if !out.status.success() {
        debug!(stderr = %String::from_utf8_lossy(&out.stderr), "cargo fmt output");
        return Err(CliError::ExternalCommandFailed {
            command: format!("cargo fmt ({})", out.status),
            source: None,
        });
    }
    Ok(())
}

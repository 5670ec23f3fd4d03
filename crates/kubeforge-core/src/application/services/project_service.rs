//! Project Service - the operator workflows.
//!
//! - `init`: lay out a new operator project in an (almost) empty directory
//! - `create_api`: add a resource and/or controller and wire them into the
//!   existing entrypoint and module files
//!
//! Both keep the `PROJECT` record at the root current. It is only written
//! after every other builder of the run succeeded.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateCatalog, TemplateRenderer},
        services::scaffold_service::{Scaffold, ScaffoldReport},
    },
    domain::{
        Builder, Creator, DEFAULT_DOMAIN, DomainError, Feature, FeatureSet, IfExistsAction,
        License, PROJECT_FILE, ProjectConfig, ScaffoldSession,
    },
    error::{ForgeError, ForgeResult},
};

/// Where `init` writes the license header and `create api` reads it back.
pub const BOILERPLATE_PATH: &str = "hack/boilerplate.rs.txt";

/// File `create api` requires before it touches anything.
pub const ENTRYPOINT_PATH: &str = "src/main.rs";

/// Files `init` tolerates in its target directory besides dotfiles,
/// `*.md` files and all-uppercase names.
const ALLOWED_FILES: [&str; 2] = ["Cargo.toml", "Cargo.lock"];

#[derive(Debug, Clone)]
pub struct InitOptions {
    pub license: License,
    /// Recorded in `PROJECT`; groups of this project live under it.
    pub domain: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            license: License::default(),
            domain: DEFAULT_DOMAIN.to_string(),
        }
    }
}

/// What `create api` should generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiOptions {
    pub resource: bool,
    pub controller: bool,
    /// Regenerate the types and controller files even if they exist.
    pub force: bool,
}

impl ApiOptions {
    /// Features the inserters should wire.
    pub fn features(&self) -> FeatureSet {
        let mut features = FeatureSet::new();
        features.set(Feature::Resource, self.resource);
        features.set(Feature::Controller, self.controller);
        features
    }
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            resource: true,
            controller: true,
            force: false,
        }
    }
}

pub struct ProjectService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn TemplateRenderer>,
    catalog: Box<dyn TemplateCatalog>,
    fail_fast: bool,
}

impl ProjectService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        renderer: Box<dyn TemplateRenderer>,
        catalog: Box<dyn TemplateCatalog>,
    ) -> Self {
        Self {
            filesystem,
            renderer,
            catalog,
            fail_fast: true,
        }
    }

    /// Keep running the remaining builders after one fails.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Initialise a project in `root`.
    ///
    /// A failing builder stops the run unless fail-fast was turned off; the
    /// returned report then carries the failure. Call [`ScaffoldReport::into_result`]
    /// to turn it into an error.
    ///
    /// # Errors
    ///
    /// `DirectoryNotEmpty`, `InvalidDomain` or `InvalidProjectName` before
    /// anything is written.
    #[instrument(
        skip_all,
        fields(
            root = %root.display(),
            project = session.project_name(),
            license = %options.license,
            domain = %options.domain
        )
    )]
    pub fn init(
        &self,
        root: &Path,
        mut session: ScaffoldSession,
        options: &InitOptions,
    ) -> ForgeResult<ScaffoldReport> {
        self.check_dir(root)?;
        let project = ProjectConfig::new(session.project_name(), &options.domain)?;

        let scaffold = self.scaffold(root);
        let mut report = ScaffoldReport::new(scaffold.run_id());

        if let Some(boilerplate) = self.catalog.boilerplate(options.license)? {
            let bp_report = scaffold.execute(&session, &[boilerplate]);
            let ok = bp_report.is_success();
            report.merge(bp_report);
            if !ok {
                return Ok(report);
            }
            session.set_boilerplate(self.load_boilerplate(root)?);
        }

        let builders = self.catalog.project_files()?;
        report.merge(scaffold.execute(&session, &builders));

        if report.is_success() {
            let record = project_record(&project, IfExistsAction::Error)?;
            report.merge(scaffold.execute(&session, &[record]));
        }

        info!(
            run_id = %report.run_id(),
            files = report.outcomes().len(),
            "Project initialised"
        );
        Ok(report)
    }

    /// Scaffold the resource and/or controller held by `session`.
    ///
    /// # Errors
    ///
    /// `MissingResource` without a resource, `InvalidResource` when its
    /// identifiers are malformed, `MissingEntrypoint` when `src/main.rs`
    /// is absent, and `ApiAlreadyExists` when `PROJECT` already records the
    /// resource's API and `force` is off. Nothing is written in those cases.
    #[instrument(
        skip_all,
        fields(
            root = %root.display(),
            resource = options.resource,
            controller = options.controller,
            force = options.force
        )
    )]
    pub fn create_api(
        &self,
        root: &Path,
        mut session: ScaffoldSession,
        options: &ApiOptions,
    ) -> ForgeResult<ScaffoldReport> {
        let resource = session
            .resource()
            .ok_or(ApplicationError::MissingResource)?
            .clone();
        resource.validate()?;
        info!(%resource, "Creating API");

        let entrypoint = root.join(ENTRYPOINT_PATH);
        if !self.filesystem.exists(&entrypoint) {
            return Err(ApplicationError::MissingEntrypoint { path: entrypoint }.into());
        }

        let mut project = self.load_project(root, session.project_name())?;
        if options.resource && project.has_api(&resource) && !options.force {
            return Err(DomainError::ApiAlreadyExists {
                resource: resource.to_string(),
            }
            .into());
        }

        let builders = self.catalog.api_files(&resource, options)?;

        if self.filesystem.exists(&root.join(BOILERPLATE_PATH)) {
            session.set_boilerplate(self.load_boilerplate(root)?);
        }

        let scaffold = self.scaffold(root);
        let mut report = scaffold.execute(&session, &builders);

        if report.is_success() {
            project.update_resource(&resource, &options.features());
            let record = project_record(&project, IfExistsAction::Overwrite)?;
            report.merge(scaffold.execute(&session, &[record]));
        }
        Ok(report)
    }

    /// The `PROJECT` record, or a fresh one for projects that predate it.
    fn load_project(&self, root: &Path, project_name: &str) -> ForgeResult<ProjectConfig> {
        let path = root.join(PROJECT_FILE);
        if !self.filesystem.exists(&path) {
            warn!(path = %path.display(), "No PROJECT record; starting a new one");
            return Ok(ProjectConfig::new(project_name, DEFAULT_DOMAIN)?);
        }
        Ok(ProjectConfig::from_toml(&self.filesystem.read_file(&path)?)?)
    }

    fn scaffold<'a>(&'a self, root: &Path) -> Scaffold<'a> {
        Scaffold::new(self.filesystem.as_ref(), self.renderer.as_ref(), root).fail_fast(self.fail_fast)
    }

    fn load_boilerplate(&self, root: &Path) -> ForgeResult<String> {
        let path = root.join(BOILERPLATE_PATH);
        match self.filesystem.read_file(&path) {
            Ok(content) => Ok(content),
            Err(ForgeError::Application(ApplicationError::FileNotFound { .. })) => {
                warn!(
                    path = %path.display(),
                    "Boilerplate not found; generated files will have no license header"
                );
                Ok(String::new())
            }
            Err(e) => Err(e),
        }
    }

    fn check_dir(&self, root: &Path) -> ForgeResult<()> {
        if !self.filesystem.exists(root) {
            return Ok(());
        }

        let offending: Vec<String> = self
            .filesystem
            .list_dir(root)?
            .into_iter()
            .filter(|name| !is_allowed_entry(name))
            .collect();

        if offending.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::DirectoryNotEmpty {
                path: PathBuf::from(root),
                entries: offending,
            }
            .into())
        }
    }
}

fn project_record(project: &ProjectConfig, if_exists: IfExistsAction) -> ForgeResult<Builder> {
    let body = project.to_toml()?;
    Ok(Creator::new("project", PROJECT_FILE, body)
        .if_exists(if_exists)
        .into())
}

fn is_allowed_entry(name: &str) -> bool {
    name.starts_with('.')
        || name.ends_with(".md")
        || (name != "PROJECT" && !name.is_empty() && name.chars().all(char::is_uppercase))
        || ALLOWED_FILES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_entries() {
        for name in [".git", ".env", "README.md", "LICENSE", "OWNERS", "Cargo.toml", "Cargo.lock"] {
            assert!(is_allowed_entry(name), "{name}");
        }
        for name in ["PROJECT", "src", "Makefile", "main.rs", "LICENSE-2"] {
            assert!(!is_allowed_entry(name), "{name}");
        }
    }

    #[test]
    fn api_options_default_to_everything() {
        let options = ApiOptions::default();
        assert!(options.resource && options.controller && !options.force);
        assert_eq!(options.features().iter().collect::<Vec<_>>(), Feature::ALL);
    }

    #[test]
    fn controller_only_features() {
        let options = ApiOptions {
            resource: false,
            ..ApiOptions::default()
        };
        let features = options.features();
        assert!(!features.contains(Feature::Resource));
        assert!(features.contains(Feature::Controller));
    }
}

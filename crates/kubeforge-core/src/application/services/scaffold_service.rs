//! Scaffold executor - applies an ordered list of builders to a tree.
//!
//! For every builder, in caller order:
//! 1. Render the path (and a creator's body) against the session
//! 2. Check whether the target exists
//! 3. Create, skip, overwrite, fail, or patch according to the builder kind
//!
//! Builders run strictly one after another, so a later builder targeting the
//! same path reads what an earlier one wrote.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
    },
    domain::{Builder, IfExistsAction, Permissions, RelativePath, ScaffoldSession, insert_fragments},
    error::{ForgeError, ForgeResult},
};

/// What happened to one target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    Created,
    Skipped,
    Overwritten,
    /// An inserter spliced at least one fragment.
    Updated,
    /// An inserter found nothing new; the file was not written.
    Unchanged,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Skipped => "skipped",
            Self::Overwritten => "overwritten",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        };
        f.write_str(s)
    }
}

/// Result of one attempted builder.
#[derive(Debug, Clone)]
pub struct BuilderOutcome {
    pub builder: String,
    /// Target path relative to the scaffold root.
    pub path: PathBuf,
    pub result: Result<FileAction, ForgeError>,
}

impl BuilderOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-builder outcomes of a scaffold run, in execution order.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    run_id: Uuid,
    outcomes: Vec<BuilderOutcome>,
}

impl ScaffoldReport {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            outcomes: Vec::new(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn outcomes(&self) -> &[BuilderOutcome] {
        &self.outcomes
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(BuilderOutcome::is_ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &BuilderOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    /// Number of files that ended with `action`.
    pub fn count(&self, action: FileAction) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, Ok(a) if a == action))
            .count()
    }

    /// Outcome recorded for a relative path, if any builder targeted it.
    pub fn action_for(&self, path: impl AsRef<Path>) -> Option<&Result<FileAction, ForgeError>> {
        let path = path.as_ref();
        self.outcomes
            .iter()
            .rev()
            .find(|o| o.path == path)
            .map(|o| &o.result)
    }

    /// Append another report's outcomes, keeping this report's run id.
    pub fn merge(&mut self, other: ScaffoldReport) {
        self.outcomes.extend(other.outcomes);
    }

    /// The first failure as `BuilderFailed`, or the report itself.
    pub fn into_result(self) -> ForgeResult<Self> {
        let failure = self.failures().next().map(|o| (o.builder.clone(), o.path.clone(), o.result.clone()));

        match failure {
            Some((builder, path, Err(source))) => Err(ApplicationError::BuilderFailed {
                builder,
                path,
                source: Box::new(source),
            }
            .into()),
            _ => Ok(self),
        }
    }
}

/// Executes builders against a root directory.
///
/// ## Failure policy
///
/// A failing builder never affects what earlier builders wrote. By default
/// the remaining builders still run; with `fail_fast(true)` the run stops
/// at the first failure and later builders are not attempted.
pub struct Scaffold<'a> {
    filesystem: &'a dyn Filesystem,
    renderer: &'a dyn TemplateRenderer,
    root: PathBuf,
    fail_fast: bool,
    run_id: Uuid,
}

impl<'a> Scaffold<'a> {
    pub fn new(
        filesystem: &'a dyn Filesystem,
        renderer: &'a dyn TemplateRenderer,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            filesystem,
            renderer,
            root: root.into(),
            fail_fast: false,
            run_id: Uuid::new_v4(),
        }
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Apply `builders` in order.
    pub fn execute(&self, session: &ScaffoldSession, builders: &[Builder]) -> ScaffoldReport {
        let span = info_span!(
            "scaffold",
            run_id = %self.run_id,
            root = %self.root.display(),
            builders = builders.len()
        );
        let _enter = span.enter();

        let mut report = ScaffoldReport::new(self.run_id);

        for builder in builders {
            let variables = merged_variables(session, builder);

            let (path, result) = match self.resolve_path(builder, &variables) {
                Ok(path) => {
                    let result = self.apply(session, builder, &path, &variables);
                    (path.into_path_buf(), result)
                }
                Err(e) => (PathBuf::from(builder.path_template()), Err(e)),
            };

            match &result {
                Ok(action) => info!(
                    builder = builder.name(),
                    path = %path.display(),
                    %action,
                    "Builder applied"
                ),
                Err(e) => warn!(
                    builder = builder.name(),
                    path = %path.display(),
                    error = %e,
                    "Builder failed"
                ),
            }

            let failed = result.is_err();
            report.outcomes.push(BuilderOutcome {
                builder: builder.name().to_string(),
                path,
                result,
            });

            if failed && self.fail_fast {
                debug!("Stopping after first failure");
                break;
            }
        }

        report
    }

    fn resolve_path(
        &self,
        builder: &Builder,
        variables: &BTreeMap<String, String>,
    ) -> ForgeResult<RelativePath> {
        let rendered = self
            .renderer
            .render(builder.name(), builder.path_template(), variables)?;
        Ok(RelativePath::try_new(rendered)?)
    }

    fn apply(
        &self,
        session: &ScaffoldSession,
        builder: &Builder,
        path: &RelativePath,
        variables: &BTreeMap<String, String>,
    ) -> ForgeResult<FileAction> {
        let full = self.root.join(path);

        match builder {
            Builder::Creator(creator) => {
                let body = self.renderer.render(builder.name(), creator.body(), variables)?;
                let exists = self.filesystem.exists(&full);

                match (exists, creator.if_exists_action()) {
                    (false, _) => {
                        self.write(&full, &body, builder.permissions())?;
                        Ok(FileAction::Created)
                    }
                    (true, IfExistsAction::Skip) => Ok(FileAction::Skipped),
                    (true, IfExistsAction::Error) => {
                        Err(ApplicationError::FileAlreadyExists { path: full }.into())
                    }
                    (true, IfExistsAction::Overwrite) => {
                        self.write(&full, &body, builder.permissions())?;
                        Ok(FileAction::Overwritten)
                    }
                }
            }
            Builder::Inserter(inserter) => {
                if !self.filesystem.exists(&full) {
                    let skeleton = self.renderer.render(
                        builder.name(),
                        &inserter.skeleton_template(),
                        variables,
                    )?;
                    self.write(&full, &skeleton, builder.permissions())?;
                    return Ok(FileAction::Created);
                }

                let content = self.filesystem.read_file(&full)?;
                let fragments = inserter.fragments(session.resource());
                let insertion = insert_fragments(&content, inserter.markers(), &fragments);

                if insertion.is_unchanged() {
                    return Ok(FileAction::Unchanged);
                }

                debug!(
                    path = %full.display(),
                    inserted = insertion.inserted,
                    "Inserting fragments"
                );
                self.write(&full, &insertion.content, builder.permissions())?;
                Ok(FileAction::Updated)
            }
        }
    }

    fn write(&self, path: &Path, content: &str, permissions: Permissions) -> ForgeResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.filesystem.create_dir_all(parent)?;
            }
        }
        self.filesystem.write_file(path, content, permissions)
    }
}

fn merged_variables(session: &ScaffoldSession, builder: &Builder) -> BTreeMap<String, String> {
    let mut variables = session.variables().clone();
    variables.extend(
        builder
            .variables()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    variables
}

//! Application services - orchestrate use cases.
//!
//! `Scaffold` applies builders; `ProjectService` picks the builders for the
//! `init` and `create api` workflows and runs them.

pub mod project_service;
pub mod scaffold_service;

pub use project_service::{ApiOptions, BOILERPLATE_PATH, ENTRYPOINT_PATH, InitOptions, ProjectService};
pub use scaffold_service::{BuilderOutcome, FileAction, Scaffold, ScaffoldReport};

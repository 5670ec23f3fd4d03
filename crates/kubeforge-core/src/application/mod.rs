//! Application layer for Kubeforge.
//!
//! This layer contains:
//! - **Services**: the scaffold executor and the project workflows
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! Business rules (marker matching, fragment ordering, insertion) live in
//! `crate::domain`; this layer sequences them and performs I/O via ports.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ApiOptions, BOILERPLATE_PATH, BuilderOutcome, ENTRYPOINT_PATH, FileAction, InitOptions,
    ProjectService, Scaffold, ScaffoldReport,
};

pub use ports::{Filesystem, TemplateCatalog, TemplateRenderer};

pub use error::ApplicationError;

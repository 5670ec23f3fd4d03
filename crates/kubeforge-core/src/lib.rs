//! Kubeforge Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers of the Kubeforge operator scaffolder.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          kubeforge-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │      (ProjectService, Scaffold)         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, TemplateRenderer, Catalog) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     kubeforge-adapters (Infrastructure) │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Marker, Builder, insert_fragments)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kubeforge_core::prelude::*;
//!
//! let registry = CommentSyntaxRegistry::default();
//! let imports = Marker::new(&registry, "src/main.rs", "imports")?;
//!
//! let builders: Vec<Builder> = vec![
//!     Creator::new("main", "src/main.rs", "{{MARKER_IMPORTS}}\nfn main() {}\n")
//!         .with_marker("MARKER_IMPORTS", &imports)
//!         .into(),
//! ];
//!
//! let report = Scaffold::new(&filesystem, &renderer, "./my-operator")
//!     .execute(&ScaffoldSession::new("my-operator")?, &builders);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApiOptions, FileAction, InitOptions, ProjectService, Scaffold, ScaffoldReport,
        ports::{Filesystem, TemplateCatalog, TemplateRenderer},
    };
    pub use crate::domain::{
        Builder, CommentSyntaxRegistry, Creator, Feature, FeatureSet, IfExistsAction, Inserter,
        License, Marker, Permissions, ProjectConfig, Resource, ScaffoldSession,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

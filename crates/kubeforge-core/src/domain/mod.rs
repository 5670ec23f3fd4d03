//! Core domain layer for Kubeforge.
//!
//! Pure logic only: markers, builders, fragment resolution and the
//! insertion algorithm. All I/O happens behind the ports defined in the
//! application layer.
//!
//! - **No I/O**: file content goes in and comes out as strings
//! - **No global state**: the comment-syntax table is an explicit value
//! - **Deterministic**: fragment order follows feature declaration order

pub mod entities;
pub mod error;
pub mod fragments;
pub mod insertion;
pub mod marker;

pub use entities::{
    ApiRecord, Builder, Creator, DEFAULT_DOMAIN, IfExistsAction, Inserter, License, PROJECT_FILE,
    Permissions, ProjectConfig, RelativePath, Resource, ResourceRecord, ScaffoldSession,
};
pub use error::{DomainError, ErrorCategory};
pub use fragments::{CodeFragments, Feature, FeatureSet, FragmentRule, resolve_fragments};
pub use insertion::{Insertion, insert_fragments};
pub use marker::{CommentSyntaxRegistry, DEFAULT_PREFIX, Marker};

//! Application ports (traits) for external dependencies.
//!
//! - **Driven (Output) Ports**: called by the application, implemented by
//!   infrastructure
//!   - `Filesystem`: file operations
//!   - `TemplateRenderer`: body and path rendering
//!   - `TemplateCatalog`: the builders each workflow applies

pub mod output;

pub use output::{Filesystem, TemplateCatalog, TemplateRenderer};

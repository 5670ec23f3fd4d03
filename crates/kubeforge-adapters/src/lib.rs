//! Infrastructure adapters for Kubeforge.
//!
//! This crate implements the ports defined in `kubeforge-core::application::ports`.
//! It contains all I/O and the concrete template bodies.

pub mod catalog;
pub mod filesystem;
pub mod renderer;
pub mod templates;

// Re-export commonly used adapters
pub use catalog::RustOperatorCatalog;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;

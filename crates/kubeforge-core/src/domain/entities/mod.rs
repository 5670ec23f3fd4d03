pub mod builder;
pub mod common;
pub mod license;
pub mod project;
pub mod resource;
pub mod session;

pub use builder::{Builder, Creator, IfExistsAction, Inserter};
pub use common::{Permissions, RelativePath};
pub use license::License;
pub use project::{ApiRecord, DEFAULT_DOMAIN, PROJECT_FILE, ProjectConfig, ResourceRecord};
pub use resource::Resource;
pub use session::ScaffoldSession;

//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "create a project" or "add a dependency".

pub mod packaging_service;
pub mod project_service;
pub mod questionnaire;
pub mod setup_service;

pub use packaging_service::{PackagingService, VenvTool};
pub use project_service::ProjectAssembler;
pub use questionnaire::Questionnaire;
pub use setup_service::{PackageOp, SetupPyEditor, setup_path};

//! Application layer for Sceleton.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProjectAssembler, SetupPyEditor,
//!   PackagingService, Questionnaire)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    PackageOp, PackagingService, ProjectAssembler, Questionnaire, SetupPyEditor, VenvTool,
    setup_path,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandLine, CommandRunner, Filesystem, Prompter, TemplateKind, TemplateStore};

pub use error::ApplicationError;

//! Infrastructure adapters for Sceleton.
//!
//! This crate implements the ports defined in `sceleton-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog;
pub mod filesystem;
pub mod process;
pub mod prompt;
pub mod templates;

// Re-export commonly used adapters
pub use catalog::builtin_catalog;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{RecordingRunner, SystemRunner};
pub use prompt::{ScriptedPrompter, StdinPrompter};
pub use templates::{BuiltinTemplates, OverlayTemplates};

//! Core domain layer for Sceleton.
//!
//! Pure logic with no I/O: the classifier catalog, project descriptors, the
//! structured `setup.py` model and template variable substitution. All
//! filesystem, subprocess and terminal concerns sit behind the ports in
//! `crate::application`.

pub mod classifiers;
pub mod descriptor;
pub mod error;
pub mod license;
pub mod project_structure;
pub mod render;
pub mod selection;
pub mod setup_py;

mod validation;

pub use classifiers::{ClassifierCatalog, ClassifierCategory};
pub use descriptor::{ProjectDescriptor, split_keywords};
pub use error::{DomainError, ErrorCategory};
pub use license::License;
pub use project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure};
pub use render::{RenderContext, package_name};
pub use setup_py::{SetupArg, SetupPy, SetupValue};
pub use validation::DomainValidator;

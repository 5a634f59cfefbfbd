//! Sceleton Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Sceleton
//! Python package scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           sceleton-cli (CLI)            │
//! │     (Parses verbs, drives services)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ProjectAssembler, SetupPyEditor, ...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, CommandRunner, Templates,  │
//! │  Prompter)                              │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    sceleton-adapters (Infrastructure)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ClassifierCatalog, SetupPy, License)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use sceleton_core::{application::SetupPyEditor, domain::SetupValue};
//!
//! # fn run(editor: SetupPyEditor) -> sceleton_core::error::SceletonResult<()> {
//! let path = Path::new("setup.py");
//! editor.edit("version", "0.2.0", path)?;
//! assert_eq!(editor.get("version", path)?, SetupValue::from("0.2.0"));
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// The types most callers need.
pub mod prelude {
    pub use crate::application::{
        PackageOp, PackagingService, ProjectAssembler, Questionnaire, SetupPyEditor, VenvTool,
        ports::{CommandLine, CommandRunner, Filesystem, Prompter, TemplateKind, TemplateStore},
    };
    pub use crate::domain::{
        ClassifierCatalog, ClassifierCategory, License, ProjectDescriptor, SetupPy, SetupValue,
    };
    pub use crate::error::{SceletonError, SceletonResult};
}

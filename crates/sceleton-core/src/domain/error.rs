// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (services re-wrap them freely)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("setup.py could not be understood: {reason}")]
    MalformedSetupPy { reason: String },

    #[error("Invalid selection '{input}': choose numbers between 1 and {max}")]
    InvalidSelection { input: String, max: usize },

    #[error("Invalid package name '{name}': {reason}")]
    InvalidPackageName { name: String, reason: String },

    #[error("Field '{field}' is not a {expected}")]
    FieldTypeMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Project structure is empty")]
    EmptyStructure,

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Field '{field}' is not set in setup.py")]
    FieldNotFound { field: String },

    #[error("Unknown license '{name}'")]
    UnknownLicense { name: String },

    #[error("Unknown classifier category '{name}'")]
    UnknownCategory { name: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Classifier catalog has no entries for '{category}'")]
    EmptyCatalogCategory { category: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedSetupPy { reason } => vec![
                format!("Details: {reason}"),
                "Only keyword arguments inside a single setup(...) call are supported".into(),
                "Fix the file by hand or regenerate it with: sceleton init".into(),
            ],
            Self::InvalidSelection { max, .. } => vec![
                format!("Enter numbers from 1 to {max}, separated by spaces"),
                "Leave the answer empty to keep the default".into(),
            ],
            Self::InvalidPackageName { name, .. } => vec![
                format!("'{name}' must be a valid Python identifier"),
                "Use lowercase letters, digits and underscores".into(),
                "Examples: utils, my_module, api2".into(),
            ],
            Self::FieldNotFound { field } => vec![
                format!("setup.py has no '{field}=' argument"),
                format!("Set it with: sceleton {field} --edit"),
            ],
            Self::UnknownLicense { .. } => vec![
                "Supported licenses:".into(),
                "  • MIT License".into(),
                "  • Apache Software License".into(),
                "  • GNU General Public License v3 (GPLv3)".into(),
                "  • BSD License".into(),
                "  • ISC License (ISCL)".into(),
                "  • The Unlicense (Unlicense)".into(),
            ],
            Self::EmptyCatalogCategory { category } => vec![
                format!("The bundled classifier list has no '{category}' entries"),
                "This is a packaging bug, please report it".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedSetupPy { .. }
            | Self::InvalidSelection { .. }
            | Self::InvalidPackageName { .. }
            | Self::FieldTypeMismatch { .. } => ErrorCategory::Validation,
            Self::FieldNotFound { .. }
            | Self::UnknownLicense { .. }
            | Self::UnknownCategory { .. } => ErrorCategory::NotFound,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

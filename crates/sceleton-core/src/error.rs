//! The error every public core operation returns.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

pub type SceletonResult<T> = Result<T, SceletonError>;

#[derive(Debug, Error, Clone)]
pub enum SceletonError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// A configured value cannot be used, e.g. a templates path that is a file.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SceletonError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { .. } => vec![
                "Fix the value in your sceleton config or unset it to use the default".into(),
            ],
            Self::Internal { .. } => vec!["Re-run with -vv and include the log in a bug report".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category().into(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    pub fn is_file_exists(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::FileExists { .. }))
    }

    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::MissingFile { .. }))
    }
}

/// Coarse grouping used by the CLI to pick an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

impl From<domain::ErrorCategory> for ErrorCategory {
    fn from(category: domain::ErrorCategory) -> Self {
        match category {
            domain::ErrorCategory::Validation => Self::Validation,
            domain::ErrorCategory::NotFound => Self::NotFound,
            domain::ErrorCategory::Internal => Self::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_category_is_mapped() {
        let err: SceletonError = DomainError::FieldNotFound {
            field: "license".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(err.to_string(), "Field 'license' is not set in setup.py");
    }

    #[test]
    fn predicates_match_variants() {
        let exists: SceletonError = ApplicationError::FileExists {
            path: "demo".into(),
        }
        .into();
        assert!(exists.is_file_exists());
        assert!(!exists.is_missing_file());
    }

    #[test]
    fn configuration_has_its_own_category() {
        let err = SceletonError::Configuration {
            message: "bad".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(!err.suggestions().is_empty());
    }
}

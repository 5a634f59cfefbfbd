//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! logic. Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Target file or directory is already there.
    #[error("File exists: {path}")]
    FileExists { path: PathBuf },

    /// A file the command depends on is absent.
    #[error("Missing required file: {path}")]
    MissingFile { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// External command exited unsuccessfully.
    #[error("Command `{command}` failed{}", .status.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    CommandFailed {
        command: String,
        status: Option<i32>,
    },

    /// External program is not installed.
    #[error("Command not found: {program}")]
    CommandNotFound { program: String },

    /// No template resource with this name.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// Reading an answer from the operator failed.
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FileExists { path } => vec![
                format!("'{}' already exists", path.display()),
                "Choose a different name or remove the existing path".into(),
            ],
            Self::MissingFile { path } => vec![
                format!("Expected to find '{}'", path.display()),
                "Run this command from the project root".into(),
                "Create a setup.py first with: sceleton init".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::CommandFailed { .. } => vec![
                "Check the command output above for details".into(),
            ],
            Self::CommandNotFound { program } => vec![
                format!("Install '{program}' and make sure it is in your PATH"),
            ],
            Self::TemplateNotFound { name } => vec![
                format!("No bundled or local template named '{name}'"),
                "Check the templates.local_path setting".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Run with --quick to skip interactive questions".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileExists { .. } => ErrorCategory::Validation,
            Self::MissingFile { .. }
            | Self::CommandNotFound { .. }
            | Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::CommandFailed { .. } => ErrorCategory::Internal,
            Self::PromptFailed { .. } => ErrorCategory::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_message_includes_status() {
        let err = ApplicationError::CommandFailed {
            command: "git init".into(),
            status: Some(128),
        };
        assert_eq!(err.to_string(), "Command `git init` failed with exit code 128");

        let killed = ApplicationError::CommandFailed {
            command: "twine upload".into(),
            status: None,
        };
        assert_eq!(killed.to_string(), "Command `twine upload` failed");
    }

    #[test]
    fn missing_file_points_to_init() {
        let err = ApplicationError::MissingFile {
            path: "setup.py".into(),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("sceleton init")));
    }
}

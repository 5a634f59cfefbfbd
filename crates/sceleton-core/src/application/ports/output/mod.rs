//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `sceleton-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::License;
use crate::error::SceletonResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sceleton_adapters::filesystem::LocalFilesystem` (production)
/// - `sceleton_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a single directory; fails with `FileExists` if it is already there.
    fn create_dir(&self, path: &Path) -> SceletonResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SceletonResult<()>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> SceletonResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> SceletonResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Files directly inside a directory, sorted.
    fn list_files(&self, path: &Path) -> SceletonResult<Vec<PathBuf>>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> SceletonResult<()>;
}

/// A subprocess invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandLine {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Port for running external programs (`git`, `pip`, `twine`, ...).
///
/// Calls block until the program exits. Implemented by:
/// - `sceleton_adapters::process::SystemRunner` (production)
/// - `sceleton_adapters::process::RecordingRunner` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandLine) -> SceletonResult<()>;
}

/// Files of a Django app skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DjangoFile {
    Apps,
    Models,
    Views,
    Admin,
    Urls,
    Tests,
    Migrations,
}

impl DjangoFile {
    pub const ALL: [DjangoFile; 7] = [
        Self::Apps,
        Self::Models,
        Self::Views,
        Self::Admin,
        Self::Urls,
        Self::Tests,
        Self::Migrations,
    ];

    /// Path inside the package directory.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Apps => "apps.py",
            Self::Models => "models.py",
            Self::Views => "views.py",
            Self::Admin => "admin.py",
            Self::Urls => "urls.py",
            Self::Tests => "tests.py",
            Self::Migrations => "migrations/__init__.py",
        }
    }
}

/// Every template the assembler can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    SetupPy,
    SetupCfg,
    Readme,
    GitIgnore,
    PackageInit,
    License(License),
    Django(DjangoFile),
}

impl TemplateKind {
    /// Resource name, relative to a templates directory.
    pub fn resource_name(self) -> String {
        match self {
            Self::SetupPy => "setup.py.tmpl".into(),
            Self::SetupCfg => "setup.cfg.tmpl".into(),
            Self::Readme => "README.rst.tmpl".into(),
            Self::GitIgnore => "gitignore.tmpl".into(),
            Self::PackageInit => "__init__.py.tmpl".into(),
            Self::License(license) => {
                format!("licenses/{}.tmpl", license.spdx().to_ascii_lowercase())
            }
            Self::Django(file) => format!("django/{}.tmpl", file.path()),
        }
    }
}

/// Port for template text retrieval.
///
/// Implemented by:
/// - `sceleton_adapters::templates::BuiltinTemplates` (compiled in)
/// - `sceleton_adapters::templates::OverlayTemplates` (user directory first)
pub trait TemplateStore: Send + Sync {
    fn get(&self, kind: TemplateKind) -> SceletonResult<String>;
}

/// Port for asking the operator questions.
///
/// Implemented by:
/// - `sceleton_adapters::prompt::StdinPrompter` (plain stdin)
/// - `sceleton_adapters::prompt::ScriptedPrompter` (testing)
/// - the CLI's dialoguer-backed prompter
pub trait Prompter {
    /// Ask a free-text question. An empty answer yields `default` when given.
    fn ask(&self, prompt: &str, default: Option<&str>) -> SceletonResult<String>;

    /// Show a numbered (1-based) list of choices.
    fn show_menu(&self, title: &str, items: &[String]) -> SceletonResult<()>;

    /// Tell the operator their last answer was rejected.
    fn warn(&self, message: &str) -> SceletonResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_display() {
        let cmd = CommandLine::new("python3", ".").args(["setup.py", "sdist"]);
        assert_eq!(cmd.to_string(), "python3 setup.py sdist");
    }

    #[test]
    fn resource_names() {
        assert_eq!(TemplateKind::Readme.resource_name(), "README.rst.tmpl");
        assert_eq!(
            TemplateKind::License(License::Apache2).resource_name(),
            "licenses/apache-2.0.tmpl"
        );
        assert_eq!(
            TemplateKind::Django(DjangoFile::Migrations).resource_name(),
            "django/migrations/__init__.py.tmpl"
        );
    }
}

//! Packaging Service - thin wrappers over `setup.py`, `pip`, `twine`,
//! `venv`/`virtualenv` and `git`.
//!
//! Every wrapper checks the file it depends on first and fails with
//! `MissingFile` before anything is spawned.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandLine, CommandRunner, Filesystem},
    },
    error::SceletonResult,
};

pub const SETUP_PY: &str = "setup.py";
pub const DIST_DIR: &str = "dist";
pub const VENV_DIR: &str = "venv";

/// Tool used to create a virtual environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VenvTool {
    /// `<python> -m venv venv`
    #[default]
    Venv,
    /// `virtualenv venv`
    Virtualenv,
}

#[derive(Clone)]
pub struct PackagingService {
    filesystem: Arc<dyn Filesystem>,
    runner: Arc<dyn CommandRunner>,
    python: String,
}

impl PackagingService {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        runner: Arc<dyn CommandRunner>,
        python: impl Into<String>,
    ) -> Self {
        Self {
            filesystem,
            runner,
            python: python.into(),
        }
    }

    /// `<python> setup.py sdist bdist_wheel`
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn build(&self, dir: &Path) -> SceletonResult<()> {
        self.require(dir, SETUP_PY)?;
        self.run(self.python(dir).args([SETUP_PY, "sdist", "bdist_wheel"]))
    }

    /// `<python> setup.py sdist`
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn sdist(&self, dir: &Path) -> SceletonResult<()> {
        self.require(dir, SETUP_PY)?;
        self.run(self.python(dir).args([SETUP_PY, "sdist"]))
    }

    /// `twine upload dist/<file>...`
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn upload(&self, dir: &Path) -> SceletonResult<()> {
        let dist = self.require(dir, DIST_DIR)?;
        let files = self.filesystem.list_files(&dist)?;
        if files.is_empty() {
            return Err(ApplicationError::MissingFile {
                path: dist.join("*"),
            }
            .into());
        }

        let args = files.iter().map(|file| {
            let name = file.file_name().map_or_else(
                || file.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            );
            format!("{DIST_DIR}/{name}")
        });
        self.run(CommandLine::new("twine", dir).arg("upload").args(args))
    }

    /// `<python> -m pip install --editable .`
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn local(&self, dir: &Path) -> SceletonResult<()> {
        self.require(dir, SETUP_PY)?;
        self.run(
            self.python(dir)
                .args(["-m", "pip", "install", "--editable", "."]),
        )
    }

    /// `<python> -m pip install <packages>`. Recording the packages in
    /// `setup.py` is up to the caller.
    #[instrument(skip(self, dir), fields(dir = %dir.display(), count = packages.len()))]
    pub fn pip_install(&self, dir: &Path, packages: &[String]) -> SceletonResult<()> {
        self.require(dir, SETUP_PY)?;
        self.run(
            self.python(dir)
                .args(["-m", "pip", "install"])
                .args(packages.iter().cloned()),
        )
    }

    /// Create `dir/venv`.
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn venv(&self, dir: &Path, tool: VenvTool) -> SceletonResult<()> {
        let target = dir.join(VENV_DIR);
        if self.filesystem.exists(&target) {
            return Err(ApplicationError::FileExists { path: target }.into());
        }

        let command = match tool {
            VenvTool::Venv => self.python(dir).args(["-m", "venv", VENV_DIR]),
            VenvTool::Virtualenv => CommandLine::new("virtualenv", dir).arg(VENV_DIR),
        };
        self.run(command)
    }

    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn git_init(&self, dir: &Path) -> SceletonResult<()> {
        self.run(CommandLine::new("git", dir).arg("init"))
    }

    fn python(&self, dir: &Path) -> CommandLine {
        CommandLine::new(&self.python, dir)
    }

    fn require(&self, dir: &Path, name: &str) -> SceletonResult<PathBuf> {
        let path = dir.join(name);
        if !self.filesystem.exists(&path) {
            return Err(ApplicationError::MissingFile { path }.into());
        }
        Ok(path)
    }

    fn run(&self, command: CommandLine) -> SceletonResult<()> {
        debug!(command = %command, cwd = %command.cwd.display(), "Running");
        self.runner.run(&command)?;
        info!(program = %command.program, "Command finished");
        Ok(())
    }
}

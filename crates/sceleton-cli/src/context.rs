//! Wiring of adapters into core services.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Datelike;
use tracing::debug;

use sceleton_adapters::{
    BuiltinTemplates, LocalFilesystem, OverlayTemplates, SystemRunner, builtin_catalog,
};
use sceleton_core::{
    application::{
        CommandRunner, Filesystem, PackagingService, ProjectAssembler, SetupPyEditor,
        TemplateStore, setup_path,
    },
    domain::ClassifierCatalog,
};

use crate::{config::AppConfig, error::CliResult};

/// Services shared by the command handlers, built once per process.
pub struct AppContext {
    pub config: AppConfig,
    /// `--config` path, if given.
    pub config_file: Option<PathBuf>,
    pub catalog: ClassifierCatalog,
    pub packaging: PackagingService,
    pub assembler: ProjectAssembler,
    pub editor: SetupPyEditor,
    /// Directory the command operates on.
    pub project_dir: PathBuf,
}

impl AppContext {
    pub fn new(config: AppConfig, config_file: Option<PathBuf>) -> CliResult<Self> {
        let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner::new());

        let templates: Arc<dyn TemplateStore> = match &config.templates.local_path {
            Some(dir) => {
                let overlay = OverlayTemplates::load(dir)?;
                debug!(overridden = ?overlay.overridden(), "Template overrides loaded");
                Arc::new(overlay)
            }
            None => Arc::new(BuiltinTemplates::new()),
        };

        let packaging =
            PackagingService::new(filesystem.clone(), runner, config.defaults.python.clone());
        let assembler = ProjectAssembler::new(
            filesystem.clone(),
            templates,
            packaging.clone(),
            chrono::Local::now().year(),
        );

        Ok(Self {
            catalog: builtin_catalog()?,
            editor: SetupPyEditor::new(filesystem),
            packaging,
            assembler,
            config,
            config_file,
            project_dir: PathBuf::from("."),
        })
    }

    /// `setup.py` of [`Self::project_dir`].
    pub fn setup_py(&self) -> PathBuf {
        setup_path(&self.project_dir)
    }

    pub fn dir(&self) -> &Path {
        &self.project_dir
    }
}

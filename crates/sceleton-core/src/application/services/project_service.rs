//! Project Assembler - main application orchestrator.
//!
//! This service coordinates creation of Python package layouts:
//! 1. Render bundled templates with the project descriptor
//! 2. Validate the resulting structure
//! 3. Write to filesystem, rolling back a half-written project
//! 4. `git init` and optionally a virtual environment

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{DjangoFile, Filesystem, TemplateKind, TemplateStore},
    },
    domain::{
        DomainValidator as validator, FsEntry, License, ProjectDescriptor, ProjectStructure,
        RenderContext, SetupPy, SetupValue, descriptor::replace_license_classifier,
    },
    error::SceletonResult,
};

use super::{
    packaging_service::{PackagingService, SETUP_PY, VenvTool},
    setup_service::SetupPyEditor,
};

pub const LICENSE_FILE: &str = "LICENSE";
const INIT_PY: &str = "__init__.py";

/// Files rendered for every project, relative to the project root.
const TOP_LEVEL: [(TemplateKind, &str); 4] = [
    (TemplateKind::SetupCfg, "setup.cfg"),
    (TemplateKind::Readme, "README.rst"),
    (TemplateKind::GitIgnore, ".gitignore"),
    (TemplateKind::SetupPy, SETUP_PY),
];

/// Creates projects, modules and license files.
pub struct ProjectAssembler {
    filesystem: Arc<dyn Filesystem>,
    templates: Arc<dyn TemplateStore>,
    packaging: PackagingService,
    editor: SetupPyEditor,
    year: i32,
}

impl ProjectAssembler {
    /// `year` fills the `{{YEAR}}` placeholder of license texts.
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        templates: Arc<dyn TemplateStore>,
        packaging: PackagingService,
        year: i32,
    ) -> Self {
        Self {
            editor: SetupPyEditor::new(filesystem.clone()),
            filesystem,
            templates,
            packaging,
            year,
        }
    }

    /// Create `parent/<name>` with a full package layout.
    #[instrument(
        skip_all,
        fields(project = %descriptor.name, parent = %parent.display())
    )]
    pub fn create_project(
        &self,
        descriptor: &ProjectDescriptor,
        parent: &Path,
        venv: Option<VenvTool>,
    ) -> SceletonResult<PathBuf> {
        let root = parent.join(&descriptor.name);
        if self.filesystem.exists(&root) {
            return Err(ApplicationError::FileExists { path: root }.into());
        }

        let package = descriptor.package();
        validator::validate_package_name(&package)?;

        let structure = self.render_project(descriptor, &root)?;
        validator::validate_project_structure(&structure)?;
        info!(entries = structure.entry_count(), "Project rendered");

        self.write_structure(&structure)?;

        self.packaging.git_init(&root)?;
        if let Some(tool) = venv {
            self.packaging.venv(&root, tool)?;
        }

        info!("Project created");
        Ok(root)
    }

    /// Write `setup.py` and friends into an existing directory. Files other
    /// than `setup.py` that already exist are left untouched.
    #[instrument(skip_all, fields(project = %descriptor.name, dir = %dir.display()))]
    pub fn create_setup_py(
        &self,
        descriptor: &ProjectDescriptor,
        dir: &Path,
    ) -> SceletonResult<()> {
        let setup = dir.join(SETUP_PY);
        if self.filesystem.exists(&setup) {
            return Err(ApplicationError::FileExists { path: setup }.into());
        }

        let context = RenderContext::for_descriptor(descriptor, self.year);
        let mut structure = ProjectStructure::new(dir);
        self.add_top_level(&mut structure, descriptor, &context)?;

        for file in structure.files() {
            let path = dir.join(&file.path);
            if file.path != Path::new(SETUP_PY) && self.filesystem.exists(&path) {
                info!(path = %path.display(), "Keeping existing file");
                continue;
            }
            self.filesystem.write_file(&path, &file.content)?;
        }

        info!("setup.py created");
        Ok(())
    }

    /// Create `dir/<name>/__init__.py`.
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn create_module(&self, name: &str, dir: &Path) -> SceletonResult<PathBuf> {
        let setup = dir.join(SETUP_PY);
        if !self.filesystem.exists(&setup) {
            return Err(ApplicationError::MissingFile { path: setup }.into());
        }
        validator::validate_package_name(name)?;

        let module = dir.join(name);
        if self.filesystem.exists(&module) {
            return Err(ApplicationError::FileExists { path: module }.into());
        }

        let context = RenderContext::new(name);
        let content = context.render(&self.templates.get(TemplateKind::PackageInit)?);
        self.filesystem.create_dir(&module)?;
        self.filesystem.write_file(&module.join(INIT_PY), &content)?;

        info!("Module created");
        Ok(module)
    }

    /// Rewrite `LICENSE`, the `license` field and the `License ::` classifier.
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn relicense(&self, license: License, dir: &Path) -> SceletonResult<()> {
        let path = dir.join(SETUP_PY);
        let mut setup = self.editor.load(&path)?;

        let text_field = |key: &str| {
            setup
                .get(key)
                .and_then(SetupValue::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let context = RenderContext::new(text_field("name"))
            .with_variable("AUTHOR", text_field("author"))
            .with_variable("EMAIL", text_field("author_email"))
            .with_variable("YEAR", self.year.to_string());

        let classifiers = replace_license_classifier(&setup.list("classifiers")?, license);
        setup.set("license", license.name());
        setup.set("classifiers", classifiers);

        let text = context.render(&self.templates.get(TemplateKind::License(license))?);
        self.filesystem.write_file(&dir.join(LICENSE_FILE), &text)?;
        self.editor.save(&setup, &path)?;

        info!(license = license.spdx(), "License replaced");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn render_project(
        &self,
        descriptor: &ProjectDescriptor,
        root: &Path,
    ) -> SceletonResult<ProjectStructure> {
        let context = RenderContext::for_descriptor(descriptor, self.year);
        let package = PathBuf::from(descriptor.package());

        let mut structure = ProjectStructure::new(root);
        self.add_top_level(&mut structure, descriptor, &context)?;

        structure.add_directory(package.clone());
        structure.add_file(
            package.join(INIT_PY),
            context.render(&self.templates.get(TemplateKind::PackageInit)?),
        );

        if descriptor.django {
            structure.add_directory(package.join("migrations"));
            for file in DjangoFile::ALL {
                structure.add_file(
                    package.join(file.path()),
                    context.render(&self.templates.get(TemplateKind::Django(file))?),
                );
            }
        }

        Ok(structure)
    }

    fn add_top_level(
        &self,
        structure: &mut ProjectStructure,
        descriptor: &ProjectDescriptor,
        context: &RenderContext,
    ) -> SceletonResult<()> {
        for (kind, path) in TOP_LEVEL {
            let text = context.render(&self.templates.get(kind)?);
            let content = if kind == TemplateKind::SetupPy {
                let mut setup = SetupPy::parse(&text)?;
                descriptor.apply_to(&mut setup);
                setup.render()
            } else {
                text
            };
            structure.add_file(path, content);
        }

        let license = self.templates.get(TemplateKind::License(descriptor.license))?;
        structure.add_file(LICENSE_FILE, context.render(&license));
        Ok(())
    }

    /// Write project structure to filesystem with rollback on failure.
    fn write_structure(&self, structure: &ProjectStructure) -> SceletonResult<()> {
        match self.write_all(structure) {
            Ok(()) => {
                info!("Successfully wrote all files");
                Ok(())
            }
            Err(e) => {
                warn!("Write failed, attempting rollback");
                self.rollback(structure.root());
                Err(e)
            }
        }
    }

    fn write_all(&self, structure: &ProjectStructure) -> SceletonResult<()> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    self.filesystem.create_dir_all(&root.join(&dir.path))?;
                }
                FsEntry::File(file) => {
                    let path = root.join(&file.path);
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }
                    self.filesystem.write_file(&path, &file.content)?;
                }
            }
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{MockCommandRunner, MockFilesystem};
    use crate::error::SceletonError;

    struct FixedTemplates;

    impl TemplateStore for FixedTemplates {
        fn get(&self, kind: TemplateKind) -> SceletonResult<String> {
            Ok(match kind {
                TemplateKind::SetupPy => "from setuptools import setup\n\nsetup()\n".into(),
                TemplateKind::License(_) => "Copyright {{YEAR}} {{AUTHOR}}\n".into(),
                _ => "# {{PROJECT_NAME}}\n".into(),
            })
        }
    }

    fn assembler(fs: MockFilesystem, runner: MockCommandRunner) -> ProjectAssembler {
        let fs: Arc<dyn Filesystem> = Arc::new(fs);
        let packaging = PackagingService::new(fs.clone(), Arc::new(runner), "python3");
        ProjectAssembler::new(fs, Arc::new(FixedTemplates), packaging, 2026)
    }

    #[test]
    fn existing_target_is_refused_before_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let err = assembler(fs, runner)
            .create_project(&ProjectDescriptor::new("demo"), Path::new("."), None)
            .unwrap_err();
        assert!(err.is_file_exists());
    }

    #[test]
    fn failed_write_rolls_back() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .withf(|path| path == Path::new("./demo"))
            .times(1)
            .returning(|_| Ok(()));
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let err = assembler(fs, runner)
            .create_project(&ProjectDescriptor::new("demo"), Path::new("."), None)
            .unwrap_err();
        assert!(matches!(
            err,
            SceletonError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn module_requires_setup_py() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        let runner = MockCommandRunner::new();

        let err = assembler(fs, runner)
            .create_module("utils", Path::new("proj"))
            .unwrap_err();
        assert!(err.is_missing_file());
    }

    #[test]
    fn module_name_must_be_identifier() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        let runner = MockCommandRunner::new();

        let err = assembler(fs, runner)
            .create_module("my-utils", Path::new("proj"))
            .unwrap_err();
        assert!(matches!(err, SceletonError::Domain(_)));
    }
}

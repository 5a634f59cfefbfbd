//! Template stores.
//!
//! [`BuiltinTemplates`] serves the texts compiled into the binary from
//! `resources/`. [`OverlayTemplates`] indexes a user directory laid out the
//! same way and prefers its files, falling back to the built-ins.
//!
//! ```text
//! templates/
//! ├── setup.py.tmpl
//! ├── README.rst.tmpl
//! ├── licenses/
//! │   └── mit.tmpl
//! └── django/
//!     └── models.py.tmpl
//! ```

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use sceleton_core::{
    application::{
        ApplicationError,
        ports::{DjangoFile, TemplateKind, TemplateStore},
    },
    domain::License,
    error::{SceletonError, SceletonResult},
};

/// Texts bundled with the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn new() -> Self {
        Self
    }

    pub fn text(kind: TemplateKind) -> &'static str {
        match kind {
            TemplateKind::SetupPy => include_str!("../resources/setup.py.tmpl"),
            TemplateKind::SetupCfg => include_str!("../resources/setup.cfg.tmpl"),
            TemplateKind::Readme => include_str!("../resources/README.rst.tmpl"),
            TemplateKind::GitIgnore => include_str!("../resources/gitignore.tmpl"),
            TemplateKind::PackageInit => include_str!("../resources/__init__.py.tmpl"),
            TemplateKind::License(license) => match license {
                License::Mit => include_str!("../resources/licenses/mit.tmpl"),
                License::Apache2 => include_str!("../resources/licenses/apache-2.0.tmpl"),
                License::Gpl3 => include_str!("../resources/licenses/gpl-3.0.tmpl"),
                License::Bsd3 => include_str!("../resources/licenses/bsd-3-clause.tmpl"),
                License::Isc => include_str!("../resources/licenses/isc.tmpl"),
                License::Unlicense => include_str!("../resources/licenses/unlicense.tmpl"),
            },
            TemplateKind::Django(file) => match file {
                DjangoFile::Apps => include_str!("../resources/django/apps.py.tmpl"),
                DjangoFile::Models => include_str!("../resources/django/models.py.tmpl"),
                DjangoFile::Views => include_str!("../resources/django/views.py.tmpl"),
                DjangoFile::Admin => include_str!("../resources/django/admin.py.tmpl"),
                DjangoFile::Urls => include_str!("../resources/django/urls.py.tmpl"),
                DjangoFile::Tests => include_str!("../resources/django/tests.py.tmpl"),
                DjangoFile::Migrations => {
                    include_str!("../resources/django/migrations/__init__.py.tmpl")
                }
            },
        }
    }
}

impl TemplateStore for BuiltinTemplates {
    fn get(&self, kind: TemplateKind) -> SceletonResult<String> {
        Ok(Self::text(kind).to_string())
    }
}

/// User templates directory layered over [`BuiltinTemplates`].
#[derive(Debug, Clone, Default)]
pub struct OverlayTemplates {
    overrides: HashMap<String, PathBuf>,
}

impl OverlayTemplates {
    /// Index every `*.tmpl` file under `dir`.
    ///
    /// A missing directory overrides nothing; a path that is not a
    /// directory is a configuration error.
    #[instrument(skip(dir), fields(dir = %dir.display()))]
    pub fn load(dir: &Path) -> SceletonResult<Self> {
        let mut overrides = HashMap::new();
        if !dir.exists() {
            warn!("templates directory not found, using built-in templates");
            return Ok(Self { overrides });
        }
        if !dir.is_dir() {
            return Err(SceletonError::Configuration {
                message: format!("templates.local_path '{}' is not a directory", dir.display()),
            });
        }

        for entry in WalkDir::new(dir).min_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: dir.to_path_buf(),
                reason: format!("directory walk error: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("tmpl") {
                continue;
            }
            let Ok(relative) = path.strip_prefix(dir) else {
                continue;
            };

            let name = normalize_path(&relative.to_string_lossy());
            debug!(name = %name, "template override found");
            overrides.insert(name, path.to_path_buf());
        }

        info!(count = overrides.len(), "user templates indexed");
        Ok(Self { overrides })
    }

    /// Resource names that are overridden.
    pub fn overridden(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.overrides.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl TemplateStore for OverlayTemplates {
    fn get(&self, kind: TemplateKind) -> SceletonResult<String> {
        let name = kind.resource_name();
        match self.overrides.get(&name) {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                ApplicationError::FilesystemError {
                    path: path.clone(),
                    reason: format!("Failed to read template: {e}"),
                }
                .into()
            }),
            None => BuiltinTemplates.get(kind),
        }
    }
}

/// Forward slashes on every platform.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sceleton_core::domain::SetupPy;
    use tempfile::TempDir;

    #[test]
    fn every_builtin_template_is_present() {
        let mut kinds = vec![
            TemplateKind::SetupPy,
            TemplateKind::SetupCfg,
            TemplateKind::Readme,
            TemplateKind::GitIgnore,
            TemplateKind::PackageInit,
        ];
        kinds.extend(License::ALL.map(TemplateKind::License));

        for kind in kinds {
            assert!(!BuiltinTemplates::text(kind).is_empty(), "{kind:?} is empty");
        }
    }

    #[test]
    fn builtin_setup_py_parses() {
        let setup = SetupPy::parse(BuiltinTemplates::text(TemplateKind::SetupPy)).unwrap();
        assert!(setup.args().is_empty());
    }

    #[test]
    fn overlay_prefers_user_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("licenses")).unwrap();
        fs::write(temp.path().join("licenses/mit.tmpl"), "custom {{AUTHOR}}").unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let store = OverlayTemplates::load(temp.path()).unwrap();
        assert_eq!(store.overridden(), ["licenses/mit.tmpl"]);
        assert_eq!(
            store.get(TemplateKind::License(License::Mit)).unwrap(),
            "custom {{AUTHOR}}"
        );
        assert_eq!(
            store.get(TemplateKind::Readme).unwrap(),
            BuiltinTemplates::text(TemplateKind::Readme)
        );
    }

    #[test]
    fn missing_overlay_dir_uses_builtins() {
        let store = OverlayTemplates::load(Path::new("/absolutely/does/not/exist")).unwrap();
        assert!(store.overridden().is_empty());
    }

    #[test]
    fn overlay_path_to_a_file_is_a_configuration_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("templates");
        fs::write(&file, "").unwrap();

        let err = OverlayTemplates::load(&file).unwrap_err();
        assert!(matches!(err, SceletonError::Configuration { .. }));
    }
}

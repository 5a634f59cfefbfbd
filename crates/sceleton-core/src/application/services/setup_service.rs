//! Field-level reads and edits of an existing `setup.py`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        DomainError, SetupPy, SetupValue,
        setup_py::{add_requirements, remove_requirements},
    },
    error::SceletonResult,
};

use super::packaging_service::SETUP_PY;

pub const INSTALL_REQUIRES: &str = "install_requires";

/// Direction of an `install_requires` edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageOp {
    Add,
    Remove,
}

/// `dir/setup.py`
pub fn setup_path(dir: &Path) -> PathBuf {
    dir.join(SETUP_PY)
}

#[derive(Clone)]
pub struct SetupPyEditor {
    filesystem: Arc<dyn Filesystem>,
}

impl SetupPyEditor {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Read and parse the file.
    pub fn load(&self, path: &Path) -> SceletonResult<SetupPy> {
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::MissingFile {
                path: path.to_path_buf(),
            }
            .into());
        }
        let text = self.filesystem.read_to_string(path)?;
        Ok(SetupPy::parse(&text)?)
    }

    pub fn save(&self, setup: &SetupPy, path: &Path) -> SceletonResult<()> {
        self.filesystem.write_file(path, &setup.render())
    }

    /// Value of `field`.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn get(&self, field: &str, path: &Path) -> SceletonResult<SetupValue> {
        let setup = self.load(path)?;
        setup.get(field).cloned().ok_or_else(|| {
            DomainError::FieldNotFound {
                field: field.to_string(),
            }
            .into()
        })
    }

    /// Like [`get`](Self::get), but a missing field reads as `None`.
    pub fn try_get(&self, field: &str, path: &Path) -> SceletonResult<Option<SetupValue>> {
        Ok(self.load(path)?.get(field).cloned())
    }

    /// Replace (or append) `field` and rewrite the file.
    #[instrument(skip(self, value, path), fields(path = %path.display()))]
    pub fn edit(
        &self,
        field: &str,
        value: impl Into<SetupValue>,
        path: &Path,
    ) -> SceletonResult<()> {
        let mut setup = self.load(path)?;
        setup.set(field, value);
        self.save(&setup, path)?;
        info!(field, "setup.py updated");
        Ok(())
    }

    /// Add or remove entries of `install_requires`. Returns the entries that
    /// actually changed; the file is left alone when nothing did.
    #[instrument(skip(self, names, path), fields(path = %path.display(), count = names.len()))]
    pub fn packages(
        &self,
        op: PackageOp,
        names: &[String],
        path: &Path,
    ) -> SceletonResult<Vec<String>> {
        let mut setup = self.load(path)?;
        let mut requires = setup.list(INSTALL_REQUIRES)?;

        let changed = match op {
            PackageOp::Add => add_requirements(&mut requires, names),
            PackageOp::Remove => remove_requirements(&mut requires, names),
        };

        if changed.is_empty() {
            return Ok(changed);
        }

        setup.set(INSTALL_REQUIRES, requires);
        self.save(&setup, path)?;
        info!(?op, changed = changed.len(), "install_requires updated");
        Ok(changed)
    }
}

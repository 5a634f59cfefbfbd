//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use sceleton_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{SceletonError, SceletonResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same contents, so a test can hand one clone to the
/// services and inspect another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    /// Writes under these paths fail.
    read_only: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.inner.read().ok()?.files.get(path).cloned()
    }

    /// All files, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Make every write at or below `path` fail.
    pub fn deny_writes(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.insert(path.into());
        }
    }

    fn read(&self) -> SceletonResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_error())
    }

    fn write(&self) -> SceletonResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_error())
    }
}

fn lock_error() -> SceletonError {
    SceletonError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

impl MemoryFilesystemInner {
    fn add_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn check_writable(&self, path: &Path) -> SceletonResult<()> {
        if self.read_only.iter().any(|p| path.starts_with(p)) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Permission denied".into(),
            }
            .into());
        }
        Ok(())
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir(&self, path: &Path) -> SceletonResult<()> {
        let mut inner = self.write()?;
        if inner.directories.contains(path) || inner.files.contains_key(path) {
            return Err(ApplicationError::FileExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        inner.check_writable(path)?;
        inner.add_dirs(path);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> SceletonResult<()> {
        let mut inner = self.write()?;
        inner.check_writable(path)?;
        inner.add_dirs(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> SceletonResult<()> {
        let mut inner = self.write()?;
        inner.check_writable(path)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> SceletonResult<String> {
        self.read()?.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::MissingFile {
                path: path.to_path_buf(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn list_files(&self, path: &Path) -> SceletonResult<Vec<PathBuf>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(ApplicationError::MissingFile {
                path: path.to_path_buf(),
            }
            .into());
        }
        Ok(inner
            .files
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }

    fn remove_dir_all(&self, path: &Path) -> SceletonResult<()> {
        let mut inner = self.write()?;
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("a/b.txt"), "x").is_err());

        fs.create_dir_all(Path::new("a")).unwrap();
        fs.write_file(Path::new("a/b.txt"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("a/b.txt")).as_deref(), Some("x"));
    }

    #[test]
    fn remove_dir_all_drops_subtree() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("demo/demo")).unwrap();
        fs.write_file(Path::new("demo/demo/__init__.py"), "").unwrap();
        fs.create_dir_all(Path::new("other")).unwrap();

        fs.remove_dir_all(Path::new("demo")).unwrap();
        assert!(!fs.exists(Path::new("demo")));
        assert!(!fs.exists(Path::new("demo/demo/__init__.py")));
        assert!(fs.exists(Path::new("other")));
    }

    #[test]
    fn denied_writes_fail() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("demo")).unwrap();
        fs.deny_writes("demo/LICENSE");

        assert!(fs.write_file(Path::new("demo/setup.py"), "").is_ok());
        assert!(fs.write_file(Path::new("demo/LICENSE"), "").is_err());
    }

    #[test]
    fn clones_share_contents() {
        let fs = MemoryFilesystem::new();
        let view = fs.clone();
        fs.create_dir(Path::new("x")).unwrap();
        assert!(view.exists(Path::new("x")));
    }
}

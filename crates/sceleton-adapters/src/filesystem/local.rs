//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use sceleton_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{SceletonError, SceletonResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir(&self, path: &Path) -> SceletonResult<()> {
        std::fs::create_dir(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn create_dir_all(&self, path: &Path) -> SceletonResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SceletonResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> SceletonResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_files(&self, path: &Path) -> SceletonResult<Vec<PathBuf>> {
        let entries =
            std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            if entry.path().is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    fn remove_dir_all(&self, path: &Path) -> SceletonResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SceletonError {
    match e.kind() {
        io::ErrorKind::AlreadyExists => ApplicationError::FileExists {
            path: path.to_path_buf(),
        },
        io::ErrorKind::NotFound => ApplicationError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: format!("Failed to {}: {}", operation, e),
        },
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_dir_reports_existing_directory() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();

        let err = fs.create_dir(temp.path()).unwrap_err();
        assert!(err.is_file_exists());
    }

    #[test]
    fn list_files_skips_directories_and_sorts() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        fs.write_file(&temp.path().join("b.whl"), "").unwrap();
        fs.write_file(&temp.path().join("a.tar.gz"), "").unwrap();
        fs.create_dir(&temp.path().join("sub")).unwrap();

        let files = fs.list_files(temp.path()).unwrap();
        assert_eq!(
            files,
            [temp.path().join("a.tar.gz"), temp.path().join("b.whl")]
        );
    }

    #[test]
    fn reading_missing_file_is_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem
            .read_to_string(&temp.path().join("setup.py"))
            .unwrap_err();
        assert!(err.is_missing_file());
    }
}

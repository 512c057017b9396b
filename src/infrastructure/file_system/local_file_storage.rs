use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::application::ports::file_storage::{FileStorage, FileStorageError};

/// Reads uploaded document bytes from a directory tree laid out as
/// `{project_id}/{filename}` under the storage root.
pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn from_env() -> Self {
        let base_path =
            PathBuf::from(std::env::var("STORAGE_DIR").unwrap_or_else(|_| "./storage".to_string()));
        Self::new(base_path)
    }

    fn resolve(&self, storage_path: &str) -> Result<PathBuf, FileStorageError> {
        let relative = Path::new(storage_path);

        // Keys come from the datastore; refuse anything that climbs out of
        // the root.
        let escapes = relative.components().any(|component| {
            matches!(component, Component::ParentDir | Component::RootDir | Component::Prefix(_))
        });
        if escapes {
            return Err(FileStorageError::InvalidPath(storage_path.to_string()));
        }

        Ok(self.base_path.join(relative))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn retrieve(&self, storage_path: &str) -> Result<Vec<u8>, FileStorageError> {
        let full_path = self.resolve(storage_path)?;

        if !full_path.exists() {
            return Err(FileStorageError::FileNotFound(storage_path.to_string()));
        }

        fs::read(&full_path)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))
    }

    async fn exists(&self, storage_path: &str) -> Result<bool, FileStorageError> {
        let full_path = self.resolve(storage_path)?;
        Ok(full_path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_bytes_by_storage_key() {
        let dir = tempfile::tempdir().unwrap();
        let project_dir = dir.path().join("project-1");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::write(project_dir.join("notes.txt"), b"hello").unwrap();

        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        let data = storage.retrieve("project-1/notes.txt").await.unwrap();
        assert_eq!(data, b"hello");
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        let result = storage.retrieve("project-1/absent.pdf").await;
        assert!(matches!(result, Err(FileStorageError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_parent_traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        let result = storage.retrieve("../etc/passwd").await;
        assert!(matches!(result, Err(FileStorageError::InvalidPath(_))));
    }
}

use async_trait::async_trait;

#[derive(Debug)]
pub enum FileStorageError {
    FileNotFound(String),
    InvalidPath(String),
    IoError(String),
}

impl std::fmt::Display for FileStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStorageError::FileNotFound(path) => write!(f, "File not found: {}", path),
            FileStorageError::InvalidPath(path) => write!(f, "Invalid path: {}", path),
            FileStorageError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for FileStorageError {}

/// Read side of the upload bucket. Keys look like `{project_id}/{filename}`.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn retrieve(&self, storage_path: &str) -> Result<Vec<u8>, FileStorageError>;

    async fn exists(&self, storage_path: &str) -> Result<bool, FileStorageError>;
}

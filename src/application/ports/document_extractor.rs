use async_trait::async_trait;

#[derive(Debug)]
pub enum ExtractionError {
    UnsupportedFormat(String),
    CorruptedFile(String),
    ExtractionFailed(String),
    IoError(String),
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::UnsupportedFormat(format) => {
                write!(f, "Unsupported format: {}", format)
            }
            ExtractionError::CorruptedFile(msg) => write!(f, "Corrupted file: {}", msg),
            ExtractionError::ExtractionFailed(msg) => write!(f, "Extraction failed: {}", msg),
            ExtractionError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ExtractionError {}

/// Turns a stored file's raw bytes into plain text. The format is decided
/// from the filename suffix alone.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract_text(&self, file_name: &str, data: &[u8])
    -> Result<String, ExtractionError>;

    fn supported_extensions(&self) -> Vec<String>;

    fn can_extract(&self, extension: &str) -> bool;
}

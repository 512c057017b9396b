use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Document;

#[derive(Debug)]
pub enum DocumentRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for DocumentRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRepositoryError::NotFound(id) => write!(f, "Document not found: {}", id),
            DocumentRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            DocumentRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentRepositoryError {}

/// Gateway over the hosted `documents` table.
///
/// `find_eligible` is advisory only: there is no lock between selection and a
/// later `mark_summarized`, so concurrent runs can pick up the same row.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// All documents with `processed = false`, `doc_type != 'url'` and a NULL
    /// summary, as of this call.
    async fn find_eligible(&self) -> Result<Vec<Document>, DocumentRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DocumentRepositoryError>;

    /// Sets `summary` and flips `processed` to true in a single UPDATE.
    /// Fails with `NotFound` when no row matches the id.
    async fn mark_summarized(
        &self,
        id: Uuid,
        summary: &str,
    ) -> Result<(), DocumentRepositoryError>;
}

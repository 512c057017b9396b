use std::sync::Arc;

use crate::application::ports::change_queue::DocumentRecord;
use crate::application::services::IngestionService;

#[derive(Debug)]
pub enum HandleDocumentCreatedError {
    ProcessingError(String),
}

impl std::fmt::Display for HandleDocumentCreatedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandleDocumentCreatedError::ProcessingError(msg) => {
                write!(f, "Failed to process document: {}", msg)
            }
        }
    }
}

impl std::error::Error for HandleDocumentCreatedError {}

#[derive(Debug, Clone)]
pub struct HandleDocumentCreatedResponse {
    pub message: String,
}

/// Synchronous single-document ingestion for a freshly inserted row, invoked
/// by the webhook route and the change-event listener.
pub struct HandleDocumentCreatedUseCase {
    ingestion_service: Arc<IngestionService>,
}

impl HandleDocumentCreatedUseCase {
    pub fn new(ingestion_service: Arc<IngestionService>) -> Self {
        Self { ingestion_service }
    }

    pub async fn execute(
        &self,
        record: DocumentRecord,
    ) -> Result<HandleDocumentCreatedResponse, HandleDocumentCreatedError> {
        // Duplicate notifications are a no-op, not an error.
        if record.already_handled() {
            tracing::info!(
                document_id = %record.id,
                "Document already processed or has summary, skipping"
            );
            return Ok(HandleDocumentCreatedResponse {
                message: "Document already processed or has summary. Skipping.".to_string(),
            });
        }

        self.ingestion_service
            .ingest_one(record.id, &record.filename, record.project_id)
            .await
            .map_err(|e| HandleDocumentCreatedError::ProcessingError(e.to_string()))?;

        Ok(HandleDocumentCreatedResponse {
            message: format!("Summary generated for {}", record.filename),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use uuid::Uuid;

    use crate::application::services::ingestion_service::test_support::{
        InMemoryDocumentRepository, InMemoryFileStorage, InMemoryProjectRepository,
        StubExtractor, StubSummarizer, test_project,
    };
    use crate::domain::entities::{DocType, Document};

    fn use_case_for(
        document: &Document,
    ) -> (HandleDocumentCreatedUseCase, Arc<InMemoryDocumentRepository>) {
        let repository = Arc::new(InMemoryDocumentRepository::with_documents(vec![
            document.clone(),
        ]));
        let projects = Arc::new(InMemoryProjectRepository::with_projects(
            document
                .project_id()
                .map(test_project)
                .into_iter()
                .collect(),
        ));
        let mut files = HashMap::new();
        if let Some(path) = document.storage_path() {
            files.insert(path, b"file contents".to_vec());
        }
        let service = Arc::new(IngestionService::new(
            repository.clone(),
            projects,
            Arc::new(InMemoryFileStorage { files }),
            Arc::new(StubExtractor),
            Arc::new(StubSummarizer { fail: false }),
        ));
        (HandleDocumentCreatedUseCase::new(service), repository)
    }

    fn record_for(document: &Document) -> DocumentRecord {
        DocumentRecord {
            id: document.id(),
            filename: document.filename().to_string(),
            project_id: document.project_id(),
            doc_type: Some(document.doc_type().as_str().to_string()),
            processed: Some(document.processed()),
            summary: document.summary().map(|s| s.to_string()),
        }
    }

    #[tokio::test]
    async fn test_new_document_gets_summarized() {
        let document = Document::new(
            "notes.txt".to_string(),
            Some(Uuid::new_v4()),
            DocType::Txt,
        );
        let (use_case, repository) = use_case_for(&document);

        let response = use_case.execute(record_for(&document)).await.unwrap();

        assert!(response.message.contains("notes.txt"));
        let stored = repository.get(document.id()).unwrap();
        assert!(stored.processed());
        assert!(stored.summary().is_some());
    }

    #[tokio::test]
    async fn test_already_processed_record_is_a_noop() {
        let mut document = Document::new(
            "notes.txt".to_string(),
            Some(Uuid::new_v4()),
            DocType::Txt,
        );
        document.mark_summarized("Existing summary.".to_string());
        let (use_case, repository) = use_case_for(&document);

        let response = use_case.execute(record_for(&document)).await.unwrap();

        assert!(response.message.contains("Skipping"));
        assert_eq!(*repository.updates.lock().unwrap(), 0);
        assert_eq!(
            repository.get(document.id()).unwrap().summary(),
            Some("Existing summary.")
        );
    }

    #[tokio::test]
    async fn test_duplicate_delivery_leaves_summary_unchanged() {
        let document = Document::new(
            "notes.txt".to_string(),
            Some(Uuid::new_v4()),
            DocType::Txt,
        );
        let (use_case, repository) = use_case_for(&document);

        use_case.execute(record_for(&document)).await.unwrap();
        let stored = repository.get(document.id()).unwrap();

        // Second delivery carries the now-processed row and must not rewrite.
        use_case.execute(record_for(&stored)).await.unwrap();

        assert_eq!(*repository.updates.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failure_surfaces_as_processing_error() {
        let document = Document::new(
            "missing.txt".to_string(),
            Some(Uuid::new_v4()),
            DocType::Txt,
        );
        let (use_case, _) = use_case_for(&document);

        let mut record = record_for(&document);
        record.filename = "other.txt".to_string();

        let result = use_case.execute(record).await;
        assert!(matches!(
            result,
            Err(HandleDocumentCreatedError::ProcessingError(_))
        ));
    }
}

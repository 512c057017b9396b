use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{DocumentExtractor, FileStorage, Summarizer};
use crate::domain::entities::Document;
use crate::domain::repositories::{DocumentRepository, ProjectRepository};

#[derive(Debug)]
pub enum IngestionError {
    MissingProject,
    UnknownProject(Uuid),
    StorageError(String),
    ExtractionError(String),
    EmptyText,
    SummarizationError(String),
    StoreError(String),
}

impl std::fmt::Display for IngestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestionError::MissingProject => write!(f, "Document has no project id"),
            IngestionError::UnknownProject(id) => write!(f, "Unknown project: {}", id),
            IngestionError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            IngestionError::ExtractionError(msg) => write!(f, "Extraction error: {}", msg),
            IngestionError::EmptyText => write!(f, "No text extracted"),
            IngestionError::SummarizationError(msg) => {
                write!(f, "Summarization error: {}", msg)
            }
            IngestionError::StoreError(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl std::error::Error for IngestionError {}

#[derive(Debug, Clone, serde::Serialize)]
pub struct IngestionFailure {
    pub document_id: Uuid,
    pub reason: String,
}

/// Outcome of one batch pass. `skipped` always equals `errors.len()`; every
/// skipped document carries its reason.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct IngestionReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: Vec<IngestionFailure>,
}

impl IngestionReport {
    fn record_success(&mut self) {
        self.processed += 1;
    }

    fn record_skip(&mut self, document_id: Uuid, reason: String) {
        self.skipped += 1;
        self.errors.push(IngestionFailure {
            document_id,
            reason,
        });
    }
}

/// Drives extract -> summarize -> persist for documents. The batch path walks
/// every eligible document; the single-document path backs the webhook.
pub struct IngestionService {
    document_repository: Arc<dyn DocumentRepository>,
    project_repository: Arc<dyn ProjectRepository>,
    file_storage: Arc<dyn FileStorage>,
    document_extractor: Arc<dyn DocumentExtractor>,
    summarizer: Arc<dyn Summarizer>,
}

impl IngestionService {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        project_repository: Arc<dyn ProjectRepository>,
        file_storage: Arc<dyn FileStorage>,
        document_extractor: Arc<dyn DocumentExtractor>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            document_repository,
            project_repository,
            file_storage,
            document_extractor,
            summarizer,
        }
    }

    /// One pass over all currently eligible documents. A failure at any stage
    /// becomes a recorded skip; it never aborts the rest of the batch.
    pub async fn run_batch(&self) -> Result<IngestionReport, IngestionError> {
        tracing::info!("Fetching unprocessed, non-URL documents");

        let documents = self
            .document_repository
            .find_eligible()
            .await
            .map_err(|e| IngestionError::StoreError(e.to_string()))?;

        if documents.is_empty() {
            tracing::info!("No documents to process");
            return Ok(IngestionReport::default());
        }

        let mut report = IngestionReport::default();

        for document in &documents {
            match self.ingest_document(document).await {
                Ok(_) => {
                    tracing::info!(
                        document_id = %document.id(),
                        filename = document.filename(),
                        "Document summarized and updated"
                    );
                    report.record_success();
                }
                Err(e) => {
                    tracing::warn!(
                        document_id = %document.id(),
                        filename = document.filename(),
                        "Skipping document: {}",
                        e
                    );
                    report.record_skip(document.id(), e.to_string());
                }
            }
        }

        tracing::info!(
            processed = report.processed,
            skipped = report.skipped,
            "Batch ingestion finished"
        );

        Ok(report)
    }

    pub async fn ingest_document(&self, document: &Document) -> Result<String, IngestionError> {
        self.ingest_one(document.id(), document.filename(), document.project_id())
            .await
    }

    /// Extract -> summarize -> persist for a single document. The returned
    /// string is the stored summary.
    pub async fn ingest_one(
        &self,
        document_id: Uuid,
        filename: &str,
        project_id: Option<Uuid>,
    ) -> Result<String, IngestionError> {
        let project_id = project_id.ok_or(IngestionError::MissingProject)?;

        let project = self
            .project_repository
            .find_by_id(project_id)
            .await
            .map_err(|e| IngestionError::StoreError(e.to_string()))?
            .ok_or(IngestionError::UnknownProject(project_id))?;

        let storage_path = format!("{}/{}", project.id(), filename);

        tracing::info!(%document_id, path = %storage_path, "Processing document");

        let data = self
            .file_storage
            .retrieve(&storage_path)
            .await
            .map_err(|e| IngestionError::StorageError(e.to_string()))?;

        let raw_text = self
            .document_extractor
            .extract_text(filename, &data)
            .await
            .map_err(|e| IngestionError::ExtractionError(e.to_string()))?;

        if raw_text.trim().is_empty() {
            return Err(IngestionError::EmptyText);
        }

        let summary = self
            .summarizer
            .summarize(&raw_text)
            .await
            .map_err(|e| IngestionError::SummarizationError(e.to_string()))?;

        self.document_repository
            .mark_summarized(document_id, &summary)
            .await
            .map_err(|e| IngestionError::StoreError(e.to_string()))?;

        Ok(summary)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    use crate::application::ports::document_extractor::{DocumentExtractor, ExtractionError};
    use crate::application::ports::file_storage::{FileStorage, FileStorageError};
    use crate::application::ports::summarizer::{Summarizer, SummarizerError};
    use crate::domain::entities::{Document, Project};
    use crate::domain::repositories::document_repository::DocumentRepositoryError;
    use crate::domain::repositories::project_repository::ProjectRepositoryError;
    use crate::domain::repositories::{DocumentRepository, ProjectRepository};

    pub struct InMemoryDocumentRepository {
        documents: Mutex<HashMap<Uuid, Document>>,
        pub updates: Mutex<u32>,
    }

    impl InMemoryDocumentRepository {
        pub fn with_documents(documents: Vec<Document>) -> Self {
            Self {
                documents: Mutex::new(documents.into_iter().map(|d| (d.id(), d)).collect()),
                updates: Mutex::new(0),
            }
        }

        pub fn get(&self, id: Uuid) -> Option<Document> {
            self.documents.lock().unwrap().get(&id).cloned()
        }
    }

    #[async_trait]
    impl DocumentRepository for InMemoryDocumentRepository {
        async fn find_eligible(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
            let mut eligible: Vec<Document> = self
                .documents
                .lock()
                .unwrap()
                .values()
                .filter(|d| d.is_eligible())
                .cloned()
                .collect();
            eligible.sort_by_key(|d| (d.created_at(), d.filename().to_string()));
            Ok(eligible)
        }

        async fn find_by_id(
            &self,
            id: Uuid,
        ) -> Result<Option<Document>, DocumentRepositoryError> {
            Ok(self.documents.lock().unwrap().get(&id).cloned())
        }

        async fn mark_summarized(
            &self,
            id: Uuid,
            summary: &str,
        ) -> Result<(), DocumentRepositoryError> {
            *self.updates.lock().unwrap() += 1;
            let mut documents = self.documents.lock().unwrap();
            let document = documents
                .get_mut(&id)
                .ok_or(DocumentRepositoryError::NotFound(id))?;
            document.mark_summarized(summary.to_string());
            Ok(())
        }
    }

    pub struct InMemoryProjectRepository {
        projects: HashMap<Uuid, Project>,
    }

    impl InMemoryProjectRepository {
        pub fn with_projects(projects: Vec<Project>) -> Self {
            Self {
                projects: projects.into_iter().map(|p| (p.id(), p)).collect(),
            }
        }
    }

    #[async_trait]
    impl ProjectRepository for InMemoryProjectRepository {
        async fn find_by_id(
            &self,
            id: Uuid,
        ) -> Result<Option<Project>, ProjectRepositoryError> {
            Ok(self.projects.get(&id).cloned())
        }
    }

    pub struct InMemoryFileStorage {
        pub files: HashMap<String, Vec<u8>>,
    }

    #[async_trait]
    impl FileStorage for InMemoryFileStorage {
        async fn retrieve(&self, storage_path: &str) -> Result<Vec<u8>, FileStorageError> {
            self.files
                .get(storage_path)
                .cloned()
                .ok_or_else(|| FileStorageError::FileNotFound(storage_path.to_string()))
        }

        async fn exists(&self, storage_path: &str) -> Result<bool, FileStorageError> {
            Ok(self.files.contains_key(storage_path))
        }
    }

    /// Decodes bytes as UTF-8, failing for anything whose name contains
    /// "corrupt".
    pub struct StubExtractor;

    #[async_trait]
    impl DocumentExtractor for StubExtractor {
        async fn extract_text(
            &self,
            file_name: &str,
            data: &[u8],
        ) -> Result<String, ExtractionError> {
            if file_name.contains("corrupt") {
                return Err(ExtractionError::CorruptedFile(file_name.to_string()));
            }
            Ok(String::from_utf8_lossy(data).to_string())
        }

        fn supported_extensions(&self) -> Vec<String> {
            vec!["txt".to_string()]
        }

        fn can_extract(&self, extension: &str) -> bool {
            extension == "txt"
        }
    }

    pub struct StubSummarizer {
        pub fail: bool,
    }

    #[async_trait]
    impl Summarizer for StubSummarizer {
        async fn summarize(&self, text: &str) -> Result<String, SummarizerError> {
            if self.fail {
                return Err(SummarizerError::ServiceUnavailable);
            }
            Ok(format!("Summary of {} bytes", text.len()))
        }
    }

    pub fn test_project(id: Uuid) -> Project {
        Project::from_parts(
            id,
            "Test Project".to_string(),
            None,
            chrono::Utc::now(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use std::collections::HashMap;

    use crate::domain::entities::DocType;

    fn service_with(
        documents: Vec<Document>,
        project_ids: Vec<Uuid>,
        files: Vec<(String, Vec<u8>)>,
        summarizer_fails: bool,
    ) -> (IngestionService, Arc<InMemoryDocumentRepository>) {
        let repository = Arc::new(InMemoryDocumentRepository::with_documents(documents));
        let projects = Arc::new(InMemoryProjectRepository::with_projects(
            project_ids.into_iter().map(test_project).collect(),
        ));
        let storage = Arc::new(InMemoryFileStorage {
            files: files.into_iter().collect::<HashMap<_, _>>(),
        });
        let service = IngestionService::new(
            repository.clone(),
            projects,
            storage,
            Arc::new(StubExtractor),
            Arc::new(StubSummarizer {
                fail: summarizer_fails,
            }),
        );
        (service, repository)
    }

    fn doc(filename: &str, project_id: Uuid) -> Document {
        Document::new(filename.to_string(), Some(project_id), DocType::Txt)
    }

    #[tokio::test]
    async fn test_empty_batch_reports_zero() {
        let (service, _) = service_with(vec![], vec![], vec![], false);

        let report = service.run_batch().await.unwrap();

        assert_eq!(report.processed, 0);
        assert_eq!(report.skipped, 0);
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_failed_document_does_not_abort_batch() {
        let project_id = Uuid::new_v4();
        let first = doc("a.txt", project_id);
        let second = doc("corrupt.txt", project_id);
        let third = doc("c.txt", project_id);
        let second_id = second.id();

        let files = vec![
            (format!("{}/a.txt", project_id), b"alpha".to_vec()),
            (format!("{}/corrupt.txt", project_id), b"beta".to_vec()),
            (format!("{}/c.txt", project_id), b"gamma".to_vec()),
        ];

        let (service, repository) = service_with(
            vec![first.clone(), second.clone(), third.clone()],
            vec![project_id],
            files,
            false,
        );

        let report = service.run_batch().await.unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].document_id, second_id);

        let stored_first = repository.get(first.id()).unwrap();
        assert!(stored_first.processed());
        assert!(stored_first.summary().is_some());

        let stored_second = repository.get(second_id).unwrap();
        assert!(!stored_second.processed());
        assert!(stored_second.summary().is_none());

        let stored_third = repository.get(third.id()).unwrap();
        assert!(stored_third.processed());
        assert!(stored_third.summary().is_some());
    }

    #[tokio::test]
    async fn test_missing_project_is_a_recorded_skip() {
        let orphan = Document::new("orphan.txt".to_string(), None, DocType::Txt);
        let orphan_id = orphan.id();

        let (service, repository) = service_with(vec![orphan], vec![], vec![], false);

        let report = service.run_batch().await.unwrap();

        assert_eq!(report.processed, 0);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.errors[0].document_id, orphan_id);
        assert!(!repository.get(orphan_id).unwrap().processed());
    }

    #[tokio::test]
    async fn test_unknown_project_is_a_recorded_skip() {
        let project_id = Uuid::new_v4();
        let document = doc("a.txt", project_id);
        let document_id = document.id();

        // Project table knows nothing about this id.
        let (service, repository) = service_with(vec![document], vec![], vec![], false);

        let report = service.run_batch().await.unwrap();

        assert_eq!(report.skipped, 1);
        assert!(report.errors[0].reason.contains("Unknown project"));
        assert!(!repository.get(document_id).unwrap().processed());
    }

    #[tokio::test]
    async fn test_empty_extraction_skips_document() {
        let project_id = Uuid::new_v4();
        let empty = doc("empty.txt", project_id);
        let empty_id = empty.id();

        let files = vec![(format!("{}/empty.txt", project_id), b"   \n".to_vec())];
        let (service, repository) = service_with(vec![empty], vec![project_id], files, false);

        let report = service.run_batch().await.unwrap();

        assert_eq!(report.processed, 0);
        assert_eq!(report.skipped, 1);
        assert!(!repository.get(empty_id).unwrap().processed());
    }

    #[tokio::test]
    async fn test_summarizer_failure_leaves_document_untouched() {
        let project_id = Uuid::new_v4();
        let document = doc("a.txt", project_id);
        let document_id = document.id();

        let files = vec![(format!("{}/a.txt", project_id), b"alpha".to_vec())];
        let (service, repository) = service_with(vec![document], vec![project_id], files, true);

        let report = service.run_batch().await.unwrap();

        assert_eq!(report.processed, 0);
        assert_eq!(report.skipped, 1);

        let stored = repository.get(document_id).unwrap();
        assert!(!stored.processed());
        assert!(stored.summary().is_none());
    }

    #[tokio::test]
    async fn test_processed_documents_are_not_reselected() {
        let project_id = Uuid::new_v4();
        let document = doc("a.txt", project_id);
        let document_id = document.id();

        let files = vec![(format!("{}/a.txt", project_id), b"alpha".to_vec())];
        let (service, repository) = service_with(vec![document], vec![project_id], files, false);

        let first_run = service.run_batch().await.unwrap();
        assert_eq!(first_run.processed, 1);

        let summary = repository
            .get(document_id)
            .unwrap()
            .summary()
            .unwrap()
            .to_string();

        // Second pass sees nothing eligible and changes nothing.
        let second_run = service.run_batch().await.unwrap();
        assert_eq!(second_run.processed, 0);
        assert_eq!(second_run.skipped, 0);
        assert_eq!(
            repository.get(document_id).unwrap().summary(),
            Some(summary.as_str())
        );
    }
}

use std::sync::Arc;

use crate::{
    application::{
        ports::{ChangeQueue, DocumentExtractor, FileStorage, Summarizer},
        services::IngestionService,
        use_cases::{HandleDocumentCreatedUseCase, RunIngestionUseCase},
    },
    domain::repositories::{DocumentRepository, ProjectRepository},
    infrastructure::{
        database::{
            create_connection_pool, get_connection_from_pool,
            repositories::{PostgresDocumentRepository, PostgresProjectRepository},
            run_migrations,
        },
        external_services::{
            LlmSummarizer, document_extractors::CompositeDocumentExtractor,
        },
        file_system::LocalFileStorage,
        messaging::{ChangeEventListener, MpscChangeQueue},
    },
    presentation::http::{
        handlers::{IngestionHandler, WebhookHandler},
        middleware::JwtAuthenticator,
    },
};

/// Explicitly constructed dependency graph. Every component receives its
/// collaborators instead of reaching for process-wide handles, so tests can
/// substitute doubles behind the traits.
pub struct AppContainer {
    // Repositories
    pub document_repository: Arc<dyn DocumentRepository>,
    pub project_repository: Arc<dyn ProjectRepository>,

    // External services
    pub file_storage: Arc<dyn FileStorage>,
    pub document_extractor: Arc<dyn DocumentExtractor>,
    pub summarizer: Arc<dyn Summarizer>,

    // Change-event plumbing
    pub change_queue: Arc<dyn ChangeQueue>,
    pub change_listener: Arc<ChangeEventListener>,

    // Application services and use cases
    pub ingestion_service: Arc<IngestionService>,
    pub run_ingestion_use_case: Arc<RunIngestionUseCase>,
    pub handle_document_created_use_case: Arc<HandleDocumentCreatedUseCase>,

    // HTTP
    pub authenticator: Arc<JwtAuthenticator>,
    pub webhook_handler: Arc<WebhookHandler>,
    pub ingestion_handler: Arc<IngestionHandler>,
}

impl AppContainer {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Database pool and migrations
        let db_pool = create_connection_pool()?;
        let mut conn = get_connection_from_pool(&db_pool)
            .map_err(|e| format!("Failed to create database connection: {}", e))?;
        run_migrations(&mut conn)
            .map_err(|e| format!("Failed to run database migrations: {}", e))?;

        // Repositories
        let document_repository: Arc<dyn DocumentRepository> =
            Arc::new(PostgresDocumentRepository::new(db_pool.clone()));
        let project_repository: Arc<dyn ProjectRepository> =
            Arc::new(PostgresProjectRepository::new(db_pool));

        // External services
        let file_storage: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::from_env());
        let document_extractor: Arc<dyn DocumentExtractor> =
            Arc::new(CompositeDocumentExtractor::new());
        let summarizer: Arc<dyn Summarizer> = Arc::new(
            LlmSummarizer::from_env()
                .map_err(|e| format!("Failed to create summarization client: {}", e))?,
        );

        // Application services
        let ingestion_service = Arc::new(IngestionService::new(
            document_repository.clone(),
            project_repository.clone(),
            file_storage.clone(),
            document_extractor.clone(),
            summarizer.clone(),
        ));

        // Use cases
        let run_ingestion_use_case =
            Arc::new(RunIngestionUseCase::new(ingestion_service.clone()));
        let handle_document_created_use_case = Arc::new(HandleDocumentCreatedUseCase::new(
            ingestion_service.clone(),
        ));

        // Change-event queue and listener
        let (change_queue, change_receiver) = MpscChangeQueue::create_pair();
        let change_queue: Arc<dyn ChangeQueue> = Arc::new(change_queue);
        let change_listener = Arc::new(ChangeEventListener::new(
            Arc::new(change_receiver),
            handle_document_created_use_case.clone(),
        ));

        // HTTP
        let authenticator = Arc::new(
            JwtAuthenticator::from_env()
                .map_err(|e| format!("Failed to configure auth: {}", e))?,
        );
        let webhook_handler = Arc::new(WebhookHandler::new(
            handle_document_created_use_case.clone(),
        ));
        let ingestion_handler = Arc::new(IngestionHandler::new(run_ingestion_use_case.clone()));

        Ok(Self {
            document_repository,
            project_repository,
            file_storage,
            document_extractor,
            summarizer,
            change_queue,
            change_listener,
            ingestion_service,
            run_ingestion_use_case,
            handle_document_created_use_case,
            authenticator,
            webhook_handler,
            ingestion_handler,
        })
    }
}

pub mod handle_document_created;
pub mod run_ingestion;

pub use handle_document_created::HandleDocumentCreatedUseCase;
pub use run_ingestion::RunIngestionUseCase;

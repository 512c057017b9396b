use std::sync::Arc;

use crate::application::services::{IngestionReport, IngestionService};
use crate::application::services::ingestion_service::IngestionError;

#[derive(Debug)]
pub enum RunIngestionError {
    StoreUnavailable(String),
}

impl std::fmt::Display for RunIngestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunIngestionError::StoreUnavailable(msg) => {
                write!(f, "Document store unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for RunIngestionError {}

/// Batch trigger behind `POST /api/summarize`. Per-document failures live in
/// the report; only a failed eligibility query is an error here.
pub struct RunIngestionUseCase {
    ingestion_service: Arc<IngestionService>,
}

impl RunIngestionUseCase {
    pub fn new(ingestion_service: Arc<IngestionService>) -> Self {
        Self { ingestion_service }
    }

    pub async fn execute(&self) -> Result<IngestionReport, RunIngestionError> {
        self.ingestion_service
            .run_batch()
            .await
            .map_err(|e| match e {
                IngestionError::StoreError(msg) => RunIngestionError::StoreUnavailable(msg),
                other => RunIngestionError::StoreUnavailable(other.to_string()),
            })
    }
}

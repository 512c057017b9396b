pub mod ingestion_service;

pub use ingestion_service::{IngestionReport, IngestionService};

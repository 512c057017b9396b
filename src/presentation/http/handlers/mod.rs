pub mod ingestion_handler;
pub mod webhook_handler;

pub use ingestion_handler::IngestionHandler;
pub use webhook_handler::WebhookHandler;

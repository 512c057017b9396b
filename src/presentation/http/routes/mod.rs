pub mod health_routes;
pub mod ingestion_routes;
pub mod webhook_routes;

pub use health_routes::*;
pub use ingestion_routes::*;
pub use webhook_routes::*;

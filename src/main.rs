mod application;
mod domain;
mod infrastructure;
mod presentation;

use tracing_subscriber::EnvFilter;

use crate::infrastructure::AppContainer;
use crate::presentation::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting ChronoBoard API");

    let container = AppContainer::new()?;

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok());

    let server = HttpServer::new(
        container.webhook_handler.clone(),
        container.ingestion_handler.clone(),
        container.authenticator.clone(),
        container.change_listener.clone(),
        port,
    );

    server.run().await
}

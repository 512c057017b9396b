use axum::{Router, middleware, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::IngestionHandler;
use crate::presentation::http::middleware::{JwtAuthenticator, require_auth};

pub fn ingestion_routes(
    ingestion_handler: Arc<IngestionHandler>,
    authenticator: Arc<JwtAuthenticator>,
) -> Router {
    Router::new()
        .route(
            "/api/summarize",
            post(IngestionHandler::summarize_documents),
        )
        .route_layer(middleware::from_fn_with_state(authenticator, require_auth))
        .with_state(ingestion_handler)
}

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::WebhookHandler;

pub fn webhook_routes(webhook_handler: Arc<WebhookHandler>) -> Router {
    Router::new()
        .route(
            "/api/webhook/document_created",
            post(WebhookHandler::document_created),
        )
        .with_state(webhook_handler)
}

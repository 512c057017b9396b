use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::infrastructure::messaging::ChangeEventListener;
use crate::presentation::http::{
    handlers::{IngestionHandler, WebhookHandler},
    middleware::JwtAuthenticator,
    routes::{health_routes, ingestion_routes, webhook_routes},
};

pub struct HttpServer {
    webhook_handler: Arc<WebhookHandler>,
    ingestion_handler: Arc<IngestionHandler>,
    authenticator: Arc<JwtAuthenticator>,
    change_listener: Arc<ChangeEventListener>,
    port: u16,
}

impl HttpServer {
    pub fn new(
        webhook_handler: Arc<WebhookHandler>,
        ingestion_handler: Arc<IngestionHandler>,
        authenticator: Arc<JwtAuthenticator>,
        change_listener: Arc<ChangeEventListener>,
        port: Option<u16>,
    ) -> Self {
        Self {
            webhook_handler,
            ingestion_handler,
            authenticator,
            change_listener,
            port: port.unwrap_or(8000),
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        // Drain change events alongside request handling.
        let change_listener = self.change_listener.clone();
        tokio::spawn(async move {
            change_listener.start().await;
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .merge(health_routes())
            .merge(webhook_routes(self.webhook_handler.clone()))
            .merge(ingestion_routes(
                self.ingestion_handler.clone(),
                self.authenticator.clone(),
            ))
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(10 * 1024 * 1024)) // 10MB cap
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(method = %request.method(), uri = %request.uri(), "request");
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                status = %response.status(),
                                latency_ms = latency.as_millis() as u64,
                                "response"
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                latency_ms = latency.as_millis() as u64,
                                "request failed: {:?}",
                                error
                            );
                        },
                    ),
            );

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        tracing::info!("Listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

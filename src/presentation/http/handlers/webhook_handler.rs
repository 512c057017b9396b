use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::HandleDocumentCreatedUseCase;
use crate::application::use_cases::handle_document_created::HandleDocumentCreatedError;
use crate::presentation::http::dto::{ErrorDetailDto, MessageResponseDto, WebhookPayloadDto};

pub struct WebhookHandler {
    handle_document_created: Arc<HandleDocumentCreatedUseCase>,
}

impl WebhookHandler {
    pub fn new(handle_document_created: Arc<HandleDocumentCreatedUseCase>) -> Self {
        Self {
            handle_document_created,
        }
    }

    /// `POST /api/webhook/document_created`: invoked by the datastore's
    /// insert hook with the new row as `record`.
    pub async fn document_created(
        State(handler): State<Arc<WebhookHandler>>,
        Json(payload): Json<WebhookPayloadDto>,
    ) -> impl IntoResponse {
        let Some(record) = payload.record else {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorDetailDto {
                    detail: "Missing document record".to_string(),
                }),
            )
                .into_response();
        };

        match handler
            .handle_document_created
            .execute(record.into())
            .await
        {
            Ok(response) => (
                StatusCode::OK,
                Json(MessageResponseDto {
                    message: response.message,
                }),
            )
                .into_response(),
            Err(HandleDocumentCreatedError::ProcessingError(msg)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDetailDto {
                    detail: format!("Failed to process document: {}", msg),
                }),
            )
                .into_response(),
        }
    }
}

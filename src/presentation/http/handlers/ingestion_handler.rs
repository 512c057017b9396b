use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::RunIngestionUseCase;
use crate::presentation::http::dto::ApiResponse;

pub struct IngestionHandler {
    run_ingestion: Arc<RunIngestionUseCase>,
}

impl IngestionHandler {
    pub fn new(run_ingestion: Arc<RunIngestionUseCase>) -> Self {
        Self { run_ingestion }
    }

    /// `POST /api/summarize`: one batch pass over everything currently
    /// eligible. Auth-gated; per-document failures come back in the report.
    pub async fn summarize_documents(
        State(handler): State<Arc<IngestionHandler>>,
    ) -> impl IntoResponse {
        match handler.run_ingestion.execute().await {
            Ok(report) => (StatusCode::OK, Json(ApiResponse::success(report))).into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(
                    "STORE_UNAVAILABLE".to_string(),
                    e.to_string(),
                )),
            )
                .into_response(),
        }
    }
}

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: String, message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError { code, message }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Webhook-style error body, `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorDetailDto {
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponseDto {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub version: String,
    pub features: FeatureFlagsDto,
    pub realtime_listener: ListenerStatusDto,
}

#[derive(Debug, Serialize)]
pub struct FeatureFlagsDto {
    pub document_ingestion: bool,
    pub ai_summaries: bool,
    pub project_management: bool,
}

#[derive(Debug, Serialize)]
pub struct ListenerStatusDto {
    pub running: bool,
    pub transport: String,
}

use async_trait::async_trait;

#[derive(Debug)]
pub enum SummarizerError {
    NetworkError(String),
    ApiError(String),
    EmptyCompletion,
    ServiceUnavailable,
}

impl std::fmt::Display for SummarizerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummarizerError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            SummarizerError::ApiError(msg) => write!(f, "API error: {}", msg),
            SummarizerError::EmptyCompletion => write!(f, "Model returned no content"),
            SummarizerError::ServiceUnavailable => write!(f, "Summarization service unavailable"),
        }
    }
}

impl std::error::Error for SummarizerError {}

/// Produces a short natural-language summary of extracted document text via
/// an external generative-text API.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError>;
}

use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::application::ports::summarizer::{Summarizer, SummarizerError};

const PROMPT_PREFIX: &str = "You are an assistant that helps summarize project documents. \
Given the following content, generate a concise summary of 3-5 sentences \
that clearly describes what the document is about. Keep it informative, \
skip fluff, and highlight key takeaways or topics if any.";

#[derive(Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SummarizationClientConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_input_chars: usize,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub backoff_factor: f64,
}

impl Default for SummarizationClientConfig {
    fn default() -> Self {
        let api_url = env::var("SUMMARIZER_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string());
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let model = env::var("SUMMARIZER_MODEL").unwrap_or_else(|_| "gpt-4".to_string());

        Self {
            api_url,
            api_key,
            model,
            temperature: 0.3,
            max_tokens: 300,
            max_input_chars: 12_000,
            max_retries: 3,
            timeout_secs: 30,
            backoff_factor: 1.5,
        }
    }
}

#[derive(Debug)]
pub enum SummarizationRequestError {
    RequestError(String),
    ParseError(String),
    MaxRetriesExceeded(String),
}

/// Chat-completions client for the external generative-text API. One request
/// per summary; a bounded timeout and a capped retry loop keep a flaky
/// upstream from wedging the pipeline.
#[derive(Debug, Clone)]
pub struct SummarizationClient {
    client: Client,
    config: SummarizationClientConfig,
}

impl SummarizationClient {
    pub fn new(config: SummarizationClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(SummarizationClientConfig::default())
    }

    pub fn config(&self) -> &SummarizationClientConfig {
        &self.config
    }

    /// Fixed instruction prompt with the document text embedded verbatim,
    /// truncated to the configured input cap.
    pub fn build_prompt(&self, raw_text: &str) -> String {
        let bounded: String = raw_text.chars().take(self.config.max_input_chars).collect();
        format!(
            "{}\n\nDocument Content:\n{}\n\nSummary:",
            PROMPT_PREFIX, bounded
        )
    }

    pub fn build_request(&self, raw_text: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: self.build_prompt(raw_text),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    pub async fn generate_summary(
        &self,
        raw_text: &str,
    ) -> Result<Option<String>, SummarizationRequestError> {
        let request = self.build_request(raw_text);
        let response = self.send_request(&request).await?;

        let summary = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty());

        Ok(summary)
    }

    async fn send_request(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, SummarizationRequestError> {
        let mut attempts = 0;
        let mut last_error = None;

        loop {
            attempts += 1;

            match self.execute_request(request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    last_error = Some(e);

                    if attempts > self.config.max_retries {
                        break;
                    }

                    let backoff_time = Duration::from_millis(
                        (self.config.backoff_factor.powi(attempts as i32 - 1) * 1000.0) as u64,
                    );

                    tokio::time::sleep(backoff_time).await;
                }
            }
        }

        Err(last_error.unwrap_or(SummarizationRequestError::MaxRetriesExceeded(
            "Max retries exceeded".to_string(),
        )))
    }

    async fn execute_request(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, SummarizationRequestError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| SummarizationRequestError::RequestError(e.without_url().to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| SummarizationRequestError::RequestError(e.without_url().to_string()))?;

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| SummarizationRequestError::ParseError(e.to_string()))
    }
}

/// Adapter hanging the client on the `Summarizer` port.
pub struct LlmSummarizer {
    client: SummarizationClient,
}

impl LlmSummarizer {
    pub fn new(client: SummarizationClient) -> Self {
        Self { client }
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Ok(Self {
            client: SummarizationClient::from_env()?,
        })
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError> {
        let summary = self
            .client
            .generate_summary(text)
            .await
            .map_err(|e| match e {
                SummarizationRequestError::RequestError(msg) => SummarizerError::NetworkError(msg),
                SummarizationRequestError::ParseError(msg) => SummarizerError::ApiError(msg),
                SummarizationRequestError::MaxRetriesExceeded(_) => {
                    SummarizerError::ServiceUnavailable
                }
            })?;

        summary.ok_or(SummarizerError::EmptyCompletion)
    }
}

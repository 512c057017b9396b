pub mod document_extractors;
pub mod summarization_client;

pub use summarization_client::{LlmSummarizer, SummarizationClient};

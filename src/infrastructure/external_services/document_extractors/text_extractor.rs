use async_trait::async_trait;

use crate::application::ports::document_extractor::{DocumentExtractor, ExtractionError};

pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for TextExtractor {
    async fn extract_text(
        &self,
        _file_name: &str,
        data: &[u8],
    ) -> Result<String, ExtractionError> {
        String::from_utf8(data.to_vec())
            .map_err(|e| ExtractionError::ExtractionFailed(format!("Invalid UTF-8: {}", e)))
    }

    fn supported_extensions(&self) -> Vec<String> {
        vec!["txt".to_string()]
    }

    fn can_extract(&self, extension: &str) -> bool {
        extension.eq_ignore_ascii_case("txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_utf8_returned_verbatim() {
        let extractor = TextExtractor::new();
        let content = "Line one\nLine two\n";

        let text = extractor
            .extract_text("notes.txt", content.as_bytes())
            .await
            .unwrap();

        assert_eq!(text, content);
    }

    #[tokio::test]
    async fn test_invalid_utf8_fails_extraction() {
        let extractor = TextExtractor::new();

        let result = extractor.extract_text("notes.txt", &[0xff, 0xfe, 0x00]).await;

        assert!(matches!(result, Err(ExtractionError::ExtractionFailed(_))));
    }
}

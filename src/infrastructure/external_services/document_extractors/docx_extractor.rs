use async_trait::async_trait;

use crate::application::ports::document_extractor::{DocumentExtractor, ExtractionError};

pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for DocxExtractor {
    async fn extract_text(
        &self,
        _file_name: &str,
        data: &[u8],
    ) -> Result<String, ExtractionError> {
        let doc = docx_rs::read_docx(data)
            .map_err(|e| ExtractionError::CorruptedFile(e.to_string()))?;

        let mut paragraphs = Vec::new();

        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                let mut line = String::new();
                for child in paragraph.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(text) = child {
                                line.push_str(&text.text);
                            }
                        }
                    }
                }
                paragraphs.push(line);
            }
        }

        Ok(paragraphs.join("\n"))
    }

    fn supported_extensions(&self) -> Vec<String> {
        vec!["docx".to_string()]
    }

    fn can_extract(&self, extension: &str) -> bool {
        extension.eq_ignore_ascii_case("docx")
    }
}

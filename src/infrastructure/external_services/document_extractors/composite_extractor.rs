use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use super::{DocxExtractor, PdfExtractor, TextExtractor};
use crate::application::ports::document_extractor::{DocumentExtractor, ExtractionError};

/// Dispatches on the filename suffix (case-insensitive) to the matching
/// format extractor. The suffix is the only format signal, matching the
/// upload flow, which names files by their original extension.
pub struct CompositeDocumentExtractor {
    pdf_extractor: Arc<PdfExtractor>,
    docx_extractor: Arc<DocxExtractor>,
    text_extractor: Arc<TextExtractor>,
}

impl CompositeDocumentExtractor {
    pub fn new() -> Self {
        Self {
            pdf_extractor: Arc::new(PdfExtractor::new()),
            docx_extractor: Arc::new(DocxExtractor::new()),
            text_extractor: Arc::new(TextExtractor::new()),
        }
    }

    fn extension_of(file_name: &str) -> Option<String> {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    fn extractor_for(&self, extension: &str) -> Option<Arc<dyn DocumentExtractor>> {
        if self.pdf_extractor.can_extract(extension) {
            Some(self.pdf_extractor.clone())
        } else if self.docx_extractor.can_extract(extension) {
            Some(self.docx_extractor.clone())
        } else if self.text_extractor.can_extract(extension) {
            Some(self.text_extractor.clone())
        } else {
            None
        }
    }
}

impl Default for CompositeDocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for CompositeDocumentExtractor {
    async fn extract_text(
        &self,
        file_name: &str,
        data: &[u8],
    ) -> Result<String, ExtractionError> {
        let extension = Self::extension_of(file_name).ok_or_else(|| {
            ExtractionError::UnsupportedFormat(format!("{} has no extension", file_name))
        })?;

        let extractor = self
            .extractor_for(&extension)
            .ok_or_else(|| ExtractionError::UnsupportedFormat(format!(".{}", extension)))?;

        extractor.extract_text(file_name, data).await
    }

    fn supported_extensions(&self) -> Vec<String> {
        let mut extensions = Vec::new();
        extensions.extend(self.pdf_extractor.supported_extensions());
        extensions.extend(self.docx_extractor.supported_extensions());
        extensions.extend(self.text_extractor.supported_extensions());
        extensions
    }

    fn can_extract(&self, extension: &str) -> bool {
        self.extractor_for(&extension.to_lowercase()).is_some()
    }
}

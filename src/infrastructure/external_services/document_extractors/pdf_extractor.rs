use async_trait::async_trait;
use lopdf::{Document, Object};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::io::Write;

use crate::application::ports::document_extractor::{DocumentExtractor, ExtractionError};

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    // Strips layout/image keys the text extraction never reads, so corrupt
    // entries in them cannot fail the load.
    fn filter_func(object_id: (u32, u16), object: &mut Object) -> Option<((u32, u16), Object)> {
        static IGNORE: &[&[u8]] = &[
            b"Length",
            b"BBox",
            b"Matrix",
            b"Filter",
            b"ColorSpace",
            b"Width",
            b"Height",
            b"BitsPerComponent",
            b"FontDescriptor",
            b"ExtGState",
            b"MediaBox",
        ];

        if let Object::Dictionary(dict) = object {
            let keys_to_remove: Vec<_> = dict
                .iter()
                .filter(|(key, _)| IGNORE.contains(&key.as_slice()))
                .map(|(key, _)| key.clone())
                .collect();
            for key in keys_to_remove {
                dict.remove(&key);
            }
        }

        Some((object_id, object.to_owned()))
    }

    /// Per-page text joined with newlines. Pages that yield nothing (scanned
    /// or image-only pages) contribute an empty line rather than an error.
    fn extract_pages(doc: &Document) -> String {
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

        let mut pages: Vec<(u32, String)> = page_numbers
            .into_par_iter()
            .map(|page_num| {
                let text = doc.extract_text(&[page_num]).unwrap_or_default();
                (page_num, text.trim_end().to_string())
            })
            .collect();

        pages.sort_by_key(|(page_num, _)| *page_num);

        pages
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_text(
        &self,
        _file_name: &str,
        data: &[u8],
    ) -> Result<String, ExtractionError> {
        // Stage the bytes to disk for the loader; the temp file is removed on
        // drop no matter which path we leave by.
        let mut staging = tempfile::NamedTempFile::new()
            .map_err(|e| ExtractionError::IoError(e.to_string()))?;
        staging
            .write_all(data)
            .map_err(|e| ExtractionError::IoError(e.to_string()))?;

        let doc = Document::load_filtered(staging.path(), Self::filter_func)
            .map_err(|e| ExtractionError::CorruptedFile(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(ExtractionError::ExtractionFailed(
                "Encrypted PDFs are not supported".to_string(),
            ));
        }

        Ok(Self::extract_pages(&doc))
    }

    fn supported_extensions(&self) -> Vec<String> {
        vec!["pdf".to_string()]
    }

    fn can_extract(&self, extension: &str) -> bool {
        extension.eq_ignore_ascii_case("pdf")
    }
}

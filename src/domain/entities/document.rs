use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of document kinds the upload flow produces. `Url` rows carry no
/// stored file and are never ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Pdf,
    Docx,
    Txt,
    Url,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Pdf => "pdf",
            DocType::Docx => "docx",
            DocType::Txt => "txt",
            DocType::Url => "url",
        }
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for DocType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "pdf" => Ok(DocType::Pdf),
            "docx" => Ok(DocType::Docx),
            "txt" => Ok(DocType::Txt),
            "url" => Ok(DocType::Url),
            other => Err(format!("Unknown document type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: Uuid,
    filename: String,
    project_id: Option<Uuid>,
    doc_type: DocType,
    summary: Option<String>,
    processed: bool,
    created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(filename: String, project_id: Option<Uuid>, doc_type: DocType) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
            project_id,
            doc_type,
            summary: None,
            processed: false,
            created_at: Utc::now(),
        }
    }

    pub fn from_parts(
        id: Uuid,
        filename: String,
        project_id: Option<Uuid>,
        doc_type: DocType,
        summary: Option<String>,
        processed: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            filename,
            project_id,
            doc_type,
            summary,
            processed,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn project_id(&self) -> Option<Uuid> {
        self.project_id
    }

    pub fn doc_type(&self) -> DocType {
        self.doc_type
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn processed(&self) -> bool {
        self.processed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// A document may enter the ingestion pipeline only while unprocessed,
    /// summary-less, and backed by an actual file.
    pub fn is_eligible(&self) -> bool {
        !self.processed && self.doc_type != DocType::Url && self.summary.is_none()
    }

    /// Storage key of the uploaded bytes, `{project_id}/{filename}`.
    pub fn storage_path(&self) -> Option<String> {
        self.project_id
            .map(|project| format!("{}/{}", project, self.filename))
    }

    pub fn mark_summarized(&mut self, summary: String) {
        self.summary = Some(summary);
        self.processed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_doc(doc_type: DocType) -> Document {
        Document::new("report.pdf".to_string(), Some(Uuid::new_v4()), doc_type)
    }

    #[test]
    fn test_new_document_is_eligible() {
        let doc = pending_doc(DocType::Pdf);
        assert!(doc.is_eligible());
        assert!(!doc.processed());
        assert!(doc.summary().is_none());
    }

    #[test]
    fn test_url_documents_are_never_eligible() {
        let doc = pending_doc(DocType::Url);
        assert!(!doc.is_eligible());
    }

    #[test]
    fn test_summarized_document_is_not_eligible() {
        let mut doc = pending_doc(DocType::Txt);
        doc.mark_summarized("A short summary.".to_string());

        assert!(!doc.is_eligible());
        assert!(doc.processed());
        assert_eq!(doc.summary(), Some("A short summary."));
    }

    #[test]
    fn test_summary_and_processed_flip_together() {
        let mut doc = pending_doc(DocType::Docx);
        doc.mark_summarized("Summary.".to_string());

        // Never one without the other.
        assert_eq!(doc.summary().is_some(), doc.processed());
    }

    #[test]
    fn test_storage_path_includes_project() {
        let project_id = Uuid::new_v4();
        let doc = Document::new("notes.txt".to_string(), Some(project_id), DocType::Txt);

        assert_eq!(
            doc.storage_path(),
            Some(format!("{}/notes.txt", project_id))
        );
    }

    #[test]
    fn test_storage_path_requires_project() {
        let doc = Document::new("orphan.pdf".to_string(), None, DocType::Pdf);
        assert_eq!(doc.storage_path(), None);
    }

    #[test]
    fn test_doc_type_round_trip() {
        for raw in ["pdf", "docx", "txt", "url"] {
            let parsed = DocType::try_from(raw).unwrap();
            assert_eq!(parsed.as_str(), raw);
        }

        assert!(DocType::try_from("csv").is_err());
    }
}

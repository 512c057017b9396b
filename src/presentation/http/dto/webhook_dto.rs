use serde::Deserialize;
use uuid::Uuid;

use crate::application::ports::change_queue::DocumentRecord;

/// Body posted by the datastore's change-notification hook:
/// `{ "record": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct WebhookPayloadDto {
    pub record: Option<DocumentRecordDto>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentRecordDto {
    pub id: Uuid,
    pub filename: String,
    pub project_id: Option<Uuid>,
    pub doc_type: Option<String>,
    pub processed: Option<bool>,
    pub summary: Option<String>,
}

impl From<DocumentRecordDto> for DocumentRecord {
    fn from(dto: DocumentRecordDto) -> Self {
        DocumentRecord {
            id: dto.id,
            filename: dto.filename,
            project_id: dto.project_id,
            doc_type: dto.doc_type,
            processed: dto.processed,
            summary: dto.summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_with_record_parses() {
        let document_id = Uuid::new_v4();
        let body = json!({
            "record": {
                "id": document_id,
                "filename": "plan.pdf",
                "doc_type": "pdf",
                "processed": false,
                "summary": null
            }
        });

        let payload: WebhookPayloadDto = serde_json::from_value(body).unwrap();
        let record: DocumentRecord = payload.record.unwrap().into();

        assert_eq!(record.id, document_id);
        assert_eq!(record.filename, "plan.pdf");
        assert!(!record.already_handled());
    }

    #[test]
    fn test_payload_without_record_is_none() {
        let payload: WebhookPayloadDto = serde_json::from_value(json!({})).unwrap();
        assert!(payload.record.is_none());
    }

    #[test]
    fn test_processed_record_is_already_handled() {
        let body = json!({
            "record": {
                "id": Uuid::new_v4(),
                "filename": "plan.pdf",
                "processed": true
            }
        });

        let payload: WebhookPayloadDto = serde_json::from_value(body).unwrap();
        let record: DocumentRecord = payload.record.unwrap().into();

        assert!(record.already_handled());
    }
}

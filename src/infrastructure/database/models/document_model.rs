use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{DocType, Document};
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: Uuid,
    pub filename: String,
    pub project_id: Option<Uuid>,
    pub doc_type: String,
    pub summary: Option<String>,
    pub processed: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DocumentModel> for Document {
    type Error = String;

    fn try_from(model: DocumentModel) -> Result<Self, Self::Error> {
        let doc_type = DocType::try_from(model.doc_type.as_str())
            .map_err(|e| format!("Invalid doc_type for {}: {}", model.id, e))?;

        Ok(Document::from_parts(
            model.id,
            model.filename,
            model.project_id,
            doc_type,
            model.summary,
            model.processed,
            model.created_at,
        ))
    }
}

use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{DocType, Document};
use crate::domain::repositories::{
    DocumentRepository, document_repository::DocumentRepositoryError,
};
use crate::infrastructure::database::connection::DbPool;
use crate::infrastructure::database::get_connection_from_pool;
use crate::infrastructure::database::models::DocumentModel;
use crate::infrastructure::database::schema::documents::dsl::*;

pub struct PostgresDocumentRepository {
    pool: DbPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn find_eligible(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let models = documents
            .filter(processed.eq(false))
            .filter(doc_type.ne(DocType::Url.as_str()))
            .filter(summary.is_null())
            .order(created_at.asc())
            .load::<DocumentModel>(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let mut eligible = Vec::with_capacity(models.len());
        for model in models {
            let document = Document::try_from(model)
                .map_err(DocumentRepositoryError::ValidationError)?;
            eligible.push(document);
        }

        Ok(eligible)
    }

    async fn find_by_id(
        &self,
        document_id: Uuid,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let result = documents
            .find(document_id)
            .first::<DocumentModel>(&mut conn)
            .optional()
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let document = Document::try_from(model)
                    .map_err(DocumentRepositoryError::ValidationError)?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    async fn mark_summarized(
        &self,
        document_id: Uuid,
        document_summary: &str,
    ) -> Result<(), DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        // Summary and processed flag land in one UPDATE so no reader ever
        // sees one without the other.
        let updated = diesel::update(documents.find(document_id))
            .set((summary.eq(document_summary), processed.eq(true)))
            .execute(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        if updated == 0 {
            return Err(DocumentRepositoryError::NotFound(document_id));
        }

        Ok(())
    }
}

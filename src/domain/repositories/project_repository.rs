use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Project;

#[derive(Debug)]
pub enum ProjectRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for ProjectRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ProjectRepositoryError {}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ProjectRepositoryError>;
}

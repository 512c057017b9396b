use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Project;
use crate::domain::repositories::{
    ProjectRepository, project_repository::ProjectRepositoryError,
};
use crate::infrastructure::database::connection::DbPool;
use crate::infrastructure::database::get_connection_from_pool;
use crate::infrastructure::database::models::ProjectModel;
use crate::infrastructure::database::schema::projects::dsl::*;

pub struct PostgresProjectRepository {
    pool: DbPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn find_by_id(
        &self,
        project_id: Uuid,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ProjectRepositoryError::DatabaseError(e.to_string()))?;

        let result = projects
            .find(project_id)
            .first::<ProjectModel>(&mut conn)
            .optional()
            .map_err(|e| ProjectRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Project::from))
    }
}

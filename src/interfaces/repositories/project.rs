use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    entities::project::{Project, ProjectInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Sync + Send {
    /// Assigns the id and creation timestamp, persists, and returns the
    /// stored record. Fields must already be validated.
    async fn create_project(&self, insert: &ProjectInsert) -> Result<Project, AppError>;

    /// All projects, newest first.
    async fn get_all_projects(&self) -> Result<Vec<Project>, AppError>;

    /// Cheap liveness probe against the backing store.
    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(&self, insert: &ProjectInsert) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                id, title, description, image_url, project_url, github_url,
                technologies, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, description, image_url, project_url, github_url,
                      technologies, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&insert.title)
        .bind(&insert.description)
        .bind(&insert.image_url)
        .bind(&insert.project_url)
        .bind(&insert.github_url)
        .bind(&insert.technologies)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    async fn get_all_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, image_url, project_url, github_url,
                   technologies, created_at
            FROM projects
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

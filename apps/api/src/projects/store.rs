use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::projects::models::{ListParams, Project};

/// Read access to the project catalogue. Carried in `AppState` as
/// `Arc<dyn ProjectStore>`.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn list(&self, params: ListParams) -> Result<Vec<Project>, AppError>;

    async fn get(&self, id: i32) -> Result<Option<Project>, AppError>;
}

/// PostgreSQL-backed store over the `projects` table.
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn list(&self, params: ListParams) -> Result<Vec<Project>, AppError> {
        let params = params.clamped();
        Ok(sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, tech_stack, github_url, live_url, image_url
            FROM projects
            ORDER BY id ASC
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(params.skip)
        .bind(params.limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Project>, AppError> {
        Ok(sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, tech_stack, github_url, live_url, image_url
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }
}

/// Fixed in-memory catalogue, ordered by id.
#[derive(Default)]
pub struct StaticProjectStore {
    projects: Vec<Project>,
}

impl StaticProjectStore {
    pub fn new(mut projects: Vec<Project>) -> Self {
        projects.sort_by_key(|p| p.id);
        Self { projects }
    }
}

#[async_trait]
impl ProjectStore for StaticProjectStore {
    async fn list(&self, params: ListParams) -> Result<Vec<Project>, AppError> {
        let params = params.clamped();
        Ok(self
            .projects
            .iter()
            .skip(params.skip as usize)
            .take(params.limit as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Project>, AppError> {
        Ok(self.projects.iter().find(|p| p.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: i32) -> Project {
        Project {
            id,
            title: format!("Project {id}"),
            description: "desc".into(),
            tech_stack: vec!["Rust".into()],
            github_url: None,
            live_url: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_static_store_orders_and_pages() {
        let store = StaticProjectStore::new(vec![project(3), project(1), project(2)]);
        let page = store.list(ListParams { skip: 1, limit: 1 }).await.unwrap();
        assert_eq!(page.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[tokio::test]
    async fn test_static_store_get() {
        let store = StaticProjectStore::new(vec![project(7)]);
        assert_eq!(store.get(7).await.unwrap().unwrap().title, "Project 7");
        assert!(store.get(8).await.unwrap().is_none());
    }
}

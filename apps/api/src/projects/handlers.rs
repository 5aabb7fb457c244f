use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use crate::errors::AppError;
use crate::projects::models::{ListParams, Project};
use crate::state::AppState;

/// GET /api/v1/projects/
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = state.projects.list(params).await?;
    debug!("Listing {} projects", projects.len());
    Ok(Json(projects))
}

/// GET /api/v1/projects/:id
pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Project>, AppError> {
    state
        .projects
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
}

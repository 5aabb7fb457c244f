pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::contact::handlers::handle_contact;
use crate::projects::handlers::{handle_get_project, handle_list_projects};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Contact relay, same-origin path and the versioned API path
        .route("/api/contact", post(handle_contact))
        .route("/api/v1/contact", post(handle_contact))
        .route("/api/v1/contact/", post(handle_contact))
        // Projects (read-only)
        .route("/api/v1/projects", get(handle_list_projects))
        .route("/api/v1/projects/", get(handle_list_projects))
        .route("/api/v1/projects/:id", get(handle_get_project))
        .with_state(state)
}

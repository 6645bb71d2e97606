// Library crate for the portfolio API
// Exports modules for use by the server binary and tests

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    create_project, delete_project, get_project, list_projects, submit_contact, update_project,
};
use crate::state::AppState;

/// Plain text body served at `/`
pub const GREETING: &str = "My portfolio fly in the sky ";

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { GREETING }))
        // Project routes
        .route("/api/projects", get(list_projects).post(create_project))
        .route(
            "/api/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        // Contact form
        .route("/api/contact", post(submit_contact))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Any origin may call the API
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

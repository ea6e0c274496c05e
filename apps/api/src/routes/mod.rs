pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::builder::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_end_session),
        )
        .route("/api/v1/sessions/:id/user", put(handlers::handle_reseed))
        // Editing
        .route(
            "/api/v1/sessions/:id/personal/:field",
            put(handlers::handle_set_personal_field),
        )
        .route(
            "/api/v1/sessions/:id/drafts/:entity",
            put(handlers::handle_put_draft),
        )
        .route(
            "/api/v1/sessions/:id/entries/:collection",
            post(handlers::handle_commit_entry),
        )
        .route(
            "/api/v1/sessions/:id/entries/:collection/:entry_id",
            delete(handlers::handle_remove_entry),
        )
        .route("/api/v1/sessions/:id/skills", post(handlers::handle_commit_skill))
        .route(
            "/api/v1/sessions/:id/skills/:kind/:value",
            delete(handlers::handle_remove_skill),
        )
        .route("/api/v1/sessions/:id/section", put(handlers::handle_set_section))
        // Rendering and export
        .route(
            "/api/v1/sessions/:id/preview",
            get(handlers::handle_preview).post(handlers::handle_toggle_preview),
        )
        .route("/api/v1/sessions/:id/document", get(handlers::handle_document))
        .route("/api/v1/sessions/:id/export", post(handlers::handle_export))
        .with_state(state)
}

//! Route definitions for session endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    archive_session, create_session, delete_session, get_session, get_statistics, list_sessions,
    update_economics, update_session_details, SessionHandlers,
};

/// Builds the session router.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/api/sessions", post(create_session).get(list_sessions))
        .route(
            "/api/sessions/:id",
            get(get_session)
                .patch(update_session_details)
                .delete(delete_session),
        )
        .route("/api/sessions/:id/economics", put(update_economics))
        .route("/api/sessions/:id/archive", post(archive_session))
        .route("/api/sessions/:id/statistics", get(get_statistics))
        .with_state(handlers)
}

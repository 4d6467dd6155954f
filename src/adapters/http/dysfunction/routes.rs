//! Route definitions for dysfunction endpoints.

use axum::{
    routing::{patch, post, put},
    Router,
};

use super::handlers::{
    bulk_create_from_catalog, classify_dysfunction, delete_dysfunction, record_dysfunction,
    update_dysfunction, DysfunctionHandlers,
};

/// Builds the dysfunction router.
pub fn dysfunction_routes(handlers: DysfunctionHandlers) -> Router {
    Router::new()
        .route("/api/sessions/:id/dysfunctions", post(record_dysfunction))
        .route(
            "/api/sessions/:id/dysfunctions/bulk",
            post(bulk_create_from_catalog),
        )
        .route(
            "/api/dysfunctions/:id",
            patch(update_dysfunction).delete(delete_dysfunction),
        )
        .route(
            "/api/dysfunctions/:id/classification",
            put(classify_dysfunction),
        )
        .with_state(handlers)
}

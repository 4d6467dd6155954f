//! Axum handlers for dysfunction endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::dysfunction::{
    BulkCreateFromCatalogCommand, BulkCreateFromCatalogHandler, ClassifyDysfunctionCommand,
    ClassifyDysfunctionHandler, DeleteDysfunctionCommand, DeleteDysfunctionHandler,
    RecordDysfunctionCommand, RecordDysfunctionHandler, UpdateDysfunctionCommand,
    UpdateDysfunctionHandler,
};
use crate::domain::dysfunction::DysfunctionError;
use crate::domain::foundation::{CommandMetadata, DysfunctionId, SessionId};

use super::dto::{
    BulkCreateRequest, BulkCreateResponse, ClassifyDysfunctionRequest, DysfunctionDeletedResponse,
    DysfunctionResponse, RecordDysfunctionRequest, UpdateDysfunctionRequest,
};

/// Shared state for dysfunction routes.
#[derive(Clone)]
pub struct DysfunctionHandlers {
    pub record_handler: Arc<RecordDysfunctionHandler>,
    pub update_handler: Arc<UpdateDysfunctionHandler>,
    pub classify_handler: Arc<ClassifyDysfunctionHandler>,
    pub bulk_create_handler: Arc<BulkCreateFromCatalogHandler>,
    pub delete_handler: Arc<DeleteDysfunctionHandler>,
}

impl DysfunctionHandlers {
    pub fn new(
        record_handler: Arc<RecordDysfunctionHandler>,
        update_handler: Arc<UpdateDysfunctionHandler>,
        classify_handler: Arc<ClassifyDysfunctionHandler>,
        bulk_create_handler: Arc<BulkCreateFromCatalogHandler>,
        delete_handler: Arc<DeleteDysfunctionHandler>,
    ) -> Self {
        Self {
            record_handler,
            update_handler,
            classify_handler,
            bulk_create_handler,
            delete_handler,
        }
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn parse_dysfunction_id(raw: &str) -> Result<DysfunctionId, Response> {
    raw.parse::<DysfunctionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid dysfunction ID")),
        )
            .into_response()
    })
}

/// POST /api/sessions/:id/dysfunctions - Record one dysfunction
pub async fn record_dysfunction(
    State(handlers): State<DysfunctionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
    Json(req): Json<RecordDysfunctionRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = RecordDysfunctionCommand {
        session_id,
        input: req.into_input(),
    };

    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.record_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = DysfunctionResponse::from(&result.dysfunction);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_dysfunction_error(e),
    }
}

/// POST /api/sessions/:id/dysfunctions/bulk - Expand a catalog selection
pub async fn bulk_create_from_catalog(
    State(handlers): State<DysfunctionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
    Json(req): Json<BulkCreateRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = BulkCreateFromCatalogCommand {
        session_id,
        taxonomy_item_ids: req.taxonomy_item_ids,
    };

    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.bulk_create_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = BulkCreateResponse {
                created: result.dysfunctions.iter().map(Into::into).collect(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_dysfunction_error(e),
    }
}

/// PATCH /api/dysfunctions/:id - Update impact figures
pub async fn update_dysfunction(
    State(handlers): State<DysfunctionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(dysfunction_id): Path<String>,
    Json(req): Json<UpdateDysfunctionRequest>,
) -> Response {
    let dysfunction_id = match parse_dysfunction_id(&dysfunction_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let mark_validated = req.validated;
    let cmd = UpdateDysfunctionCommand {
        dysfunction_id,
        update: req.into_update(),
        mark_validated,
    };

    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.update_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = DysfunctionResponse::from(&result.dysfunction);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_dysfunction_error(e),
    }
}

/// PUT /api/dysfunctions/:id/classification - Set flags and domain
pub async fn classify_dysfunction(
    State(handlers): State<DysfunctionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(dysfunction_id): Path<String>,
    Json(req): Json<ClassifyDysfunctionRequest>,
) -> Response {
    let dysfunction_id = match parse_dysfunction_id(&dysfunction_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = ClassifyDysfunctionCommand {
        dysfunction_id,
        classification: req.classification,
        domain: req.domain,
    };

    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.classify_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = DysfunctionResponse::from(&result.dysfunction);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_dysfunction_error(e),
    }
}

/// DELETE /api/dysfunctions/:id - Remove one record
pub async fn delete_dysfunction(
    State(handlers): State<DysfunctionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(dysfunction_id): Path<String>,
) -> Response {
    let dysfunction_id = match parse_dysfunction_id(&dysfunction_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = DeleteDysfunctionCommand { dysfunction_id };
    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.delete_handler.handle(cmd, metadata).await {
        Ok(()) => {
            let response = DysfunctionDeletedResponse {
                dysfunction_id: dysfunction_id.to_string(),
                message: "Dysfunction deleted".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_dysfunction_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

pub(crate) fn handle_dysfunction_error(error: DysfunctionError) -> Response {
    match error {
        DysfunctionError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Dysfunction", &id.to_string())),
        )
            .into_response(),
        DysfunctionError::UnknownCatalogItem(id) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Unknown catalog item: {}",
                id
            ))),
        )
            .into_response(),
        DysfunctionError::SessionUnavailable => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", "requested")),
        )
            .into_response(),
        DysfunctionError::SessionArchived => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(
                "Cannot modify an archived session",
            )),
        )
            .into_response(),
        DysfunctionError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        DysfunctionError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "dysfunction request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response()
        }
    }
}

//! Axum handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::session::{
    ArchiveSessionCommand, ArchiveSessionHandler, CreateSessionCommand, CreateSessionHandler,
    DeleteSessionCommand, DeleteSessionHandler, GetSessionHandler, GetSessionQuery,
    GetSessionStatisticsHandler, GetSessionStatisticsQuery, ListSessionsHandler,
    UpdateEconomicsCommand, UpdateEconomicsHandler, UpdateSessionDetailsCommand,
    UpdateSessionDetailsHandler,
};
use crate::domain::foundation::{CommandMetadata, SessionId, Timestamp};
use crate::domain::session::SessionError;

use super::dto::{
    CreateSessionRequest, EconomicsUpdateResponse, SessionDeletedResponse, SessionDetailResponse,
    SessionListResponse, SessionResponse, SessionStatisticsResponse, UpdateEconomicsRequest,
    UpdateSessionDetailsRequest,
};

/// Shared state for session routes.
#[derive(Clone)]
pub struct SessionHandlers {
    pub create_handler: Arc<CreateSessionHandler>,
    pub get_handler: Arc<GetSessionHandler>,
    pub list_handler: Arc<ListSessionsHandler>,
    pub update_details_handler: Arc<UpdateSessionDetailsHandler>,
    pub update_economics_handler: Arc<UpdateEconomicsHandler>,
    pub archive_handler: Arc<ArchiveSessionHandler>,
    pub delete_handler: Arc<DeleteSessionHandler>,
    pub statistics_handler: Arc<GetSessionStatisticsHandler>,
}

impl SessionHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_handler: Arc<CreateSessionHandler>,
        get_handler: Arc<GetSessionHandler>,
        list_handler: Arc<ListSessionsHandler>,
        update_details_handler: Arc<UpdateSessionDetailsHandler>,
        update_economics_handler: Arc<UpdateEconomicsHandler>,
        archive_handler: Arc<ArchiveSessionHandler>,
        delete_handler: Arc<DeleteSessionHandler>,
        statistics_handler: Arc<GetSessionStatisticsHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            list_handler,
            update_details_handler,
            update_economics_handler,
            archive_handler,
            delete_handler,
            statistics_handler,
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

/// POST /api/sessions - Create a new session
pub async fn create_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    let cmd = CreateSessionCommand {
        user_id: user.id.clone(),
        title: req.title,
        company: req.company,
        sector: req.sector,
        economics: req.economics.map(|e| e.into_inputs()),
    };

    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.create_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = SessionResponse::from(&result.session);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions - List the consultant's sessions
pub async fn list_sessions(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.list_handler.handle(metadata).await {
        Ok(sessions) => {
            let response = SessionListResponse::new(&sessions);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:id - One session with its dysfunctions
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetSessionQuery { session_id };
    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.get_handler.handle(query, metadata).await {
        Ok(result) => {
            let response = SessionDetailResponse::new(&result.session, &result.dysfunctions);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// PATCH /api/sessions/:id - Update descriptive fields
pub async fn update_session_details(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
    Json(req): Json<UpdateSessionDetailsRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateSessionDetailsCommand {
        session_id,
        title: req.title,
        sector: req.sector,
        notes: req.notes,
        interview_date: req.interview_date.map(Timestamp::from_datetime),
    };

    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.update_details_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = SessionResponse::from(&result.session);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// PUT /api/sessions/:id/economics - Replace economic inputs
///
/// Replacing the inputs re-derives the hourly rate; when the rate moves,
/// every dysfunction of the session is repriced before this returns.
pub async fn update_economics(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
    Json(req): Json<UpdateEconomicsRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateEconomicsCommand {
        session_id,
        economics: req.economics.into_inputs(),
    };

    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.update_economics_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = EconomicsUpdateResponse {
                session: SessionResponse::from(&result.session),
                dysfunctions_recomputed: result.dysfunctions_recomputed,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/archive - Archive a session
pub async fn archive_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = ArchiveSessionCommand { session_id };
    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.archive_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = SessionResponse::from(&result.session);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// DELETE /api/sessions/:id - Hard delete with dysfunction cascade
pub async fn delete_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = DeleteSessionCommand { session_id };
    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.delete_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = SessionDeletedResponse {
                session_id: session_id.to_string(),
                dysfunctions_removed: result.dysfunctions_removed,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:id/statistics - The statistics facade
pub async fn get_statistics(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetSessionStatisticsQuery { session_id };
    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.statistics_handler.handle(query, metadata).await {
        Ok(statistics) => {
            let response = SessionStatisticsResponse::from(&statistics);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

pub(crate) fn handle_session_error(error: SessionError) -> Response {
    match error {
        SessionError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &id.to_string())),
        )
            .into_response(),
        SessionError::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden("Permission denied")),
        )
            .into_response(),
        SessionError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        SessionError::AlreadyArchived => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(
                "Cannot modify an archived session",
            )),
        )
            .into_response(),
        SessionError::InvalidState(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(msg)),
        )
            .into_response(),
        SessionError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "session request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;

    #[test]
    fn session_error_maps_to_expected_status() {
        let cases = [
            (
                handle_session_error(SessionError::not_found(SessionId::new())),
                StatusCode::NOT_FOUND,
            ),
            (
                handle_session_error(SessionError::forbidden()),
                StatusCode::FORBIDDEN,
            ),
            (
                handle_session_error(SessionError::validation("title", "must not be empty")),
                StatusCode::BAD_REQUEST,
            ),
            (
                handle_session_error(SessionError::AlreadyArchived),
                StatusCode::CONFLICT,
            ),
            (
                handle_session_error(SessionError::infrastructure("db down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (response, expected) in cases {
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn invalid_session_id_is_a_bad_request() {
        let response = parse_session_id("not-a-uuid").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

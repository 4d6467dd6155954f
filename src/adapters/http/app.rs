//! Top-level API router assembly.
//!
//! Merges the per-resource routers and applies the cross-cutting layers:
//! authentication, tracing, request timeout and CORS.

use std::time::Duration;

use axum::{middleware, Router};
use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::dysfunction::{dysfunction_routes, DysfunctionHandlers};
use super::middleware::{auth_middleware, AuthState};
use super::session::{session_routes, SessionHandlers};

/// Builds the complete API router.
pub fn api_router(
    session_handlers: SessionHandlers,
    dysfunction_handlers: DysfunctionHandlers,
    auth: AuthState,
    config: &ServerConfig,
) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(session_routes(session_handlers))
        .merge(dysfunction_routes(dysfunction_handlers))
        .layer(middleware::from_fn_with_state(auth, auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::http::middleware::JwtVerifier;
    use crate::adapters::memory::{
        InMemoryDysfunctionRepository, InMemorySessionRepository, InMemoryTaxonomyReader,
    };
    use crate::application::handlers::dysfunction::{
        BulkCreateFromCatalogHandler, ClassifyDysfunctionHandler, DeleteDysfunctionHandler,
        RecordDysfunctionHandler, UpdateDysfunctionHandler,
    };
    use crate::application::handlers::session::{
        ArchiveSessionHandler, CreateSessionHandler, DeleteSessionHandler, GetSessionHandler,
        GetSessionStatisticsHandler, ListSessionsHandler, UpdateEconomicsHandler,
        UpdateSessionDetailsHandler,
    };
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: &str = "integration-test-secret";

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: usize,
    }

    fn bearer_token(sub: &str) -> String {
        let claims = TestClaims {
            sub: sub.to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn test_app() -> Router {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let dysfunctions = Arc::new(InMemoryDysfunctionRepository::new());
        let taxonomy = Arc::new(InMemoryTaxonomyReader::new());
        let events = Arc::new(InMemoryEventBus::new());

        let session_handlers = SessionHandlers::new(
            Arc::new(CreateSessionHandler::new(sessions.clone(), events.clone())),
            Arc::new(GetSessionHandler::new(sessions.clone(), dysfunctions.clone())),
            Arc::new(ListSessionsHandler::new(sessions.clone())),
            Arc::new(UpdateSessionDetailsHandler::new(sessions.clone())),
            Arc::new(UpdateEconomicsHandler::new(
                sessions.clone(),
                dysfunctions.clone(),
                events.clone(),
            )),
            Arc::new(ArchiveSessionHandler::new(sessions.clone(), events.clone())),
            Arc::new(DeleteSessionHandler::new(
                sessions.clone(),
                dysfunctions.clone(),
                events.clone(),
            )),
            Arc::new(GetSessionStatisticsHandler::new(
                sessions.clone(),
                dysfunctions.clone(),
            )),
        );

        let dysfunction_handlers = DysfunctionHandlers::new(
            Arc::new(RecordDysfunctionHandler::new(
                sessions.clone(),
                dysfunctions.clone(),
                events.clone(),
            )),
            Arc::new(UpdateDysfunctionHandler::new(
                sessions.clone(),
                dysfunctions.clone(),
                events.clone(),
            )),
            Arc::new(ClassifyDysfunctionHandler::new(
                sessions.clone(),
                dysfunctions.clone(),
                events.clone(),
            )),
            Arc::new(BulkCreateFromCatalogHandler::new(
                sessions.clone(),
                dysfunctions.clone(),
                taxonomy,
                events.clone(),
            )),
            Arc::new(DeleteDysfunctionHandler::new(sessions, dysfunctions, events)),
        );

        let auth: AuthState = Arc::new(JwtVerifier::new(SECRET));
        api_router(
            session_handlers,
            dysfunction_handlers,
            auth,
            &ServerConfig::default(),
        )
    }

    #[tokio::test]
    async fn request_without_token_is_unauthorized() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn request_with_garbage_token_is_unauthorized() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/sessions")
                    .header("Authorization", "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn authenticated_list_starts_empty() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/sessions")
                    .header(
                        "Authorization",
                        format!("Bearer {}", bearer_token("consultant-1")),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["total"], 0);
    }

    #[tokio::test]
    async fn session_round_trip_over_http() {
        let app = test_app();
        let token = bearer_token("consultant-1");

        let create = Request::builder()
            .method("POST")
            .uri("/api/sessions")
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .body(Body::from(
                r#"{
                    "title": "Diagnostic Q3",
                    "company": "Acme SA",
                    "economics": {
                        "scope_revenue": "1000000",
                        "gross_margin_percent": 25,
                        "hours_worked_per_year": 1600
                    }
                }"#,
            ))
            .unwrap();
        let response = app.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let created: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(created["hourly_rate"], "156.25");
        let id = created["id"].as_str().unwrap().to_string();

        let get = Request::builder()
            .uri(format!("/api/sessions/{}/statistics", id))
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(get).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let stats: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(stats["dysfunction_count"], 0);
    }

    #[tokio::test]
    async fn foreign_consultant_cannot_read_a_session() {
        let app = test_app();

        let create = Request::builder()
            .method("POST")
            .uri("/api/sessions")
            .header(
                "Authorization",
                format!("Bearer {}", bearer_token("consultant-1")),
            )
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"title": "Mine", "company": "Acme SA"}"#))
            .unwrap();
        let response = app.clone().oneshot(create).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let created: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let get = Request::builder()
            .uri(format!("/api/sessions/{}", id))
            .header(
                "Authorization",
                format!("Bearer {}", bearer_token("consultant-2")),
            )
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(get).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

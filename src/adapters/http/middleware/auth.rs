//! Authentication middleware and extractors for axum.
//!
//! Tokens are issued elsewhere; this layer only verifies them. The flow:
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::domain::foundation::UserId;

/// The consultant identity carried by a verified token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub role: String,
}

/// Token verification failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    TokenExpired,
    InvalidToken,
}

/// Claims this crate reads from a pre-issued token.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    role: Option<String>,
    #[allow(dead_code)]
    exp: usize,
}

const DEFAULT_ROLE: &str = "consultant";

/// Verifies HS256 tokens against a shared secret.
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verifies a token and extracts the consultant identity.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        let id = UserId::new(data.claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let role = data
            .claims
            .role
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());

        Ok(AuthenticatedUser { id, role })
    }
}

/// Auth middleware state.
pub type AuthState = Arc<JwtVerifier>;

/// Authentication middleware that validates Bearer tokens.
///
/// On a valid token the consultant is injected into request extensions for
/// `RequireAuth` to pick up. A missing token passes through untouched, an
/// invalid one is rejected here with 401.
pub async fn auth_middleware(
    State(verifier): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match verifier.verify(token) {
            Ok(user) => {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
            Err(e) => {
                let message = match e {
                    AuthError::TokenExpired => "Token expired",
                    AuthError::InvalidToken => "Invalid token",
                };
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({
                        "error": message,
                        "code": "AUTH_ERROR"
                    })),
                )
                    .into_response()
            }
        },
        None => next.run(request).await,
    }
}

/// Extractor that requires an authenticated consultant.
///
/// Returns 401 when the middleware did not inject a user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthRejection::Unauthenticated => (StatusCode::UNAUTHORIZED, "Authentication required"),
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": "UNAUTHENTICATED"
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    const SECRET: &str = "test-secret";

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        role: Option<String>,
        exp: usize,
    }

    fn token(sub: &str, role: Option<&str>, exp: usize) -> String {
        let claims = TestClaims {
            sub: sub.to_string(),
            role: role.map(String::from),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn far_future() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn verifier_accepts_valid_token() {
        let verifier = JwtVerifier::new(SECRET);
        let user = verifier
            .verify(&token("consultant-1", Some("admin"), far_future()))
            .unwrap();
        assert_eq!(user.id.as_str(), "consultant-1");
        assert_eq!(user.role, "admin");
    }

    #[test]
    fn verifier_defaults_missing_role() {
        let verifier = JwtVerifier::new(SECRET);
        let user = verifier
            .verify(&token("consultant-1", None, far_future()))
            .unwrap();
        assert_eq!(user.role, "consultant");
    }

    #[test]
    fn verifier_rejects_expired_token() {
        let verifier = JwtVerifier::new(SECRET);
        let exp = (chrono::Utc::now().timestamp() - 3600) as usize;
        let result = verifier.verify(&token("consultant-1", None, exp));
        assert_eq!(result.unwrap_err(), AuthError::TokenExpired);
    }

    #[test]
    fn verifier_rejects_wrong_secret() {
        let verifier = JwtVerifier::new("other-secret");
        let result = verifier.verify(&token("consultant-1", None, far_future()));
        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn verifier_rejects_empty_subject() {
        let verifier = JwtVerifier::new(SECRET);
        let result = verifier.verify(&token("", None, far_future()));
        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(AuthenticatedUser {
            id: UserId::new("consultant-1").unwrap(),
            role: "consultant".to_string(),
        });

        let (mut parts, _body) = request.into_parts();
        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;

        let RequireAuth(user) = result.unwrap();
        assert_eq!(user.id.as_str(), "consultant-1");
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[test]
    fn auth_rejection_returns_401() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

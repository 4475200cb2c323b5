//! Access Gate の失敗を表す型。
//!
//! - `AuthError`: クライアントに返す拒否 (status / code / description が全て)
//! - `GateError`: `AuthError` に加えて、鍵の取得失敗や想定外の検証エラーを区別する
use axum::http::StatusCode;
use thiserror::Error;

use crate::services::auth::jwks::JwksError;

/// A structured authorization failure.
///
/// All gate denials share this shape and differ only by `code`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {description}")]
pub struct AuthError {
    status: StatusCode,
    code: &'static str,
    description: &'static str,
}

impl AuthError {
    const fn new(status: StatusCode, code: &'static str, description: &'static str) -> Self {
        Self {
            status,
            code,
            description,
        }
    }

    pub const fn header_missing() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "authorization_header_missing",
            "Authorization header is expected.",
        )
    }

    pub const fn missing_bearer_prefix() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_header",
            "Authorization header must start with \"Bearer\".",
        )
    }

    pub const fn missing_token() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "invalid_header", "Token not found.")
    }

    pub const fn not_bearer_token() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_header",
            "Authorization header must be bearer token.",
        )
    }

    // token header に kid が無い
    pub const fn malformed_header() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_header",
            "Authorization malformed.",
        )
    }

    pub const fn unknown_key() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_header",
            "Unable to find the appropriate key.",
        )
    }

    pub const fn unparseable_token() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid_header",
            "Unable to parse authentication token.",
        )
    }

    pub const fn token_expired() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "token_expired", "Token expired.")
    }

    pub const fn invalid_claims() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_claims",
            "Incorrect claims. Please, check the audience and issuer.",
        )
    }

    pub const fn permissions_missing() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid_claims",
            "Permissions not included in JWT.",
        )
    }

    pub const fn permission_denied() -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            "unauthorized",
            "Permission not found.",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}

/// Everything `AccessGate::check` can fail with.
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Denied(#[from] AuthError),

    // Signing keys could not be obtained; the gate fails closed.
    #[error(transparent)]
    KeySource(#[from] JwksError),

    #[error("unexpected token verification failure: {0}")]
    Unexpected(jsonwebtoken::errors::Error),
}

impl GateError {
    /// The client-facing denial, if this is one.
    pub fn as_denial(&self) -> Option<&AuthError> {
        match self {
            GateError::Denied(e) => Some(e),
            _ => None,
        }
    }
}

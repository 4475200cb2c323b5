//! Access Gate: bearer token → 署名/クレーム検証 → permission 判定
//!
//! 1リクエストあたりの流れ:
//! `header あり? → Bearer 形式? → kid 解決? → 署名 OK? → claims OK? → permission あり?`
//! どこかで No になればその時点の `AuthError` で終了する。
use std::sync::Arc;

use axum::http::{HeaderMap, header};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::config::AuthSettings;
use crate::services::auth::claims::ClaimSet;
use crate::services::auth::error::{AuthError, GateError};
use crate::services::auth::jwks::KeySource;

/// Verifies bearer tokens against a JWKS key source and checks permissions.
///
/// Holds no per-request state, so one instance is shared by all requests.
pub struct AccessGate {
    keys: Arc<dyn KeySource>,
    validation: Validation,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("keys", &self.keys.backend_name())
            .field("validation", &self.validation)
            .finish()
    }
}

impl AccessGate {
    pub fn new(keys: Arc<dyn KeySource>, settings: &AuthSettings) -> Self {
        Self {
            keys,
            validation: build_validation(
                settings.algorithm,
                &settings.issuer,
                &settings.audience,
                settings.leeway_seconds,
            ),
        }
    }

    /// Authenticate the request and require `permission`.
    ///
    /// Returns the verified claims only when the token is valid *and* grants
    /// `permission`.
    pub async fn check(
        &self,
        headers: &HeaderMap,
        permission: &str,
    ) -> Result<ClaimSet, GateError> {
        let result = self.authorize(headers, permission).await;

        if let Err(err) = &result {
            match err.as_denial() {
                Some(denial) => tracing::warn!(
                    code = denial.code(),
                    status = denial.status().as_u16(),
                    permission,
                    "access denied"
                ),
                None => tracing::error!(error = %err, permission, "access gate failure"),
            }
        }

        result
    }

    async fn authorize(
        &self,
        headers: &HeaderMap,
        permission: &str,
    ) -> Result<ClaimSet, GateError> {
        let token = bearer_token(headers)?;
        let claims = self.verify(token).await?;
        claims.require_permission(permission)?;
        Ok(claims)
    }

    /// Verify signature and standard claims. Does not look at `permissions`.
    pub async fn verify(&self, token: &str) -> Result<ClaimSet, GateError> {
        let header =
            jsonwebtoken::decode_header(token).map_err(|_| AuthError::unparseable_token())?;
        let kid = header.kid.as_deref().ok_or(AuthError::malformed_header())?;

        let jwks = self.keys.fetch().await?;
        let jwk = jwks.find(kid).ok_or(AuthError::unknown_key())?;
        let key = DecodingKey::from_jwk(jwk).map_err(|e| {
            tracing::warn!(error = ?e, kid, "unusable jwk");
            AuthError::unknown_key()
        })?;

        let data = jsonwebtoken::decode::<ClaimSet>(token, &key, &self.validation)
            .map_err(classify)?;

        Ok(data.claims)
    }
}

fn build_validation(
    algorithm: Algorithm,
    issuer: &str,
    audience: &str,
    leeway_seconds: u64,
) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.set_issuer(&[issuer]);
    validation.set_audience(&[audience]);
    validation.set_required_spec_claims(&["exp", "iss", "aud"]);
    validation.validate_nbf = true;
    validation.leeway = leeway_seconds;
    validation
}

/// Extract `<token>` from `Authorization: Bearer <token>`.
///
/// The header must split into exactly two whitespace-separated parts and the
/// scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::header_missing())?;
    let value = raw
        .to_str()
        .map_err(|_| AuthError::missing_bearer_prefix())?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), _, _) if !scheme.eq_ignore_ascii_case("bearer") => {
            Err(AuthError::missing_bearer_prefix())
        }
        (None, _, _) => Err(AuthError::missing_bearer_prefix()),
        (Some(_), None, _) => Err(AuthError::missing_token()),
        (Some(_), Some(_), Some(_)) => Err(AuthError::not_bearer_token()),
        (Some(_), Some(token), None) => Ok(token),
    }
}

// jsonwebtoken の ErrorKind を gate の error code に振り分ける。
// 知らない種類は推測せず Unexpected (= 500) にする。
fn classify(err: JwtError) -> GateError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::token_expired().into(),
        ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidSubject
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::InvalidClaimFormat(_) => AuthError::invalid_claims().into(),
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::MissingAlgorithm
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthError::unparseable_token().into(),
        _ => GateError::Unexpected(err),
    }
}

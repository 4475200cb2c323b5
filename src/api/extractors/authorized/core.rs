/*
 * Responsibility
 * - 保護された handler の第1引数として Access Gate を通す extractor
 * - Authorized<P> の P (permission tag) が要求 permission を型で決める
 *
 * 置くもの
 *  - Authorized<P> / Permission trait の定義
 *  - impl FromRequestParts<AppState> for Authorized<P>
 * 置かないもの
 *  - 具体的な permission 名 (types.rs)
 *  - JWT 検証ロジック (services::auth::gate)
 */
use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::services::auth::ClaimSet;
use crate::state::AppState;

/// A permission string fixed at compile time.
pub trait Permission: Send + Sync + 'static {
    const NAME: &'static str;
}

/// Verified claims of a caller holding permission `P`.
///
/// Extracting this runs the full gate; a handler that takes it is never
/// reached without a valid token that grants `P::NAME`.
pub struct Authorized<P> {
    pub claims: ClaimSet,
    _marker: PhantomData<P>,
}

impl<P> Authorized<P> {
    fn new(claims: ClaimSet) -> Self {
        Self {
            claims,
            _marker: PhantomData,
        }
    }
}

impl<P: Permission> Authorized<P> {
    pub fn permission(&self) -> &'static str {
        P::NAME
    }
}

impl<P: Permission> FromRequestParts<AppState> for Authorized<P> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = state.gate.check(&parts.headers, P::NAME).await?;
        Ok(Self::new(claims))
    }
}

impl<P: Permission> std::fmt::Debug for Authorized<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorized")
            .field("permission", &P::NAME)
            .field("sub", &self.claims.sub)
            .finish()
    }
}

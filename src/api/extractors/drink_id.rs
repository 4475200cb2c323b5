/*
 * Responsibility
 * - Path の {drink_id} を内部 ID (i64) として受け取る
 * - 数値でない / 0 以下は「存在しない resource」として 404 に変換
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrinkId(pub i64);

impl<S> FromRequestParts<S> for DrinkId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;

        raw.parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(DrinkId)
            .ok_or(AppError::NotFound)
    }
}

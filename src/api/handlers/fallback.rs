/*
 * Responsibility
 * - 未定義の path (404) / method (405) も共通のエラー形式で返す
 */
use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

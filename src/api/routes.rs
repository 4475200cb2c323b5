/*
 * Responsibility
 * - URL 構造を定義
 * - 認可は handler の Authorized<P> 引数で route ごとに決まる
 *   (GET /drinks と /health だけが公開)
 */
use axum::{
    Router,
    routing::{get, patch},
};

use crate::api::handlers::{
    drinks::{create_drink, delete_drink, list_drink_details, list_drinks, update_drink},
    fallback::{method_not_allowed, not_found},
    health::health,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/drinks", get(list_drinks).post(create_drink))
        .route("/drinks-detail", get(list_drink_details))
        .route("/drinks/{drink_id}", patch(update_drink).delete(delete_drink))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - drinks: DrinkRepo (storage), gate: AccessGate (認可)
 * - 起動時に一度だけ組み立て、Clone 前提で持つ (内部は Arc)
 */
use std::sync::Arc;

use crate::repos::DrinkRepo;
use crate::services::auth::AccessGate;

#[derive(Clone)]
pub struct AppState {
    pub drinks: Arc<dyn DrinkRepo>,
    pub gate: Arc<AccessGate>,
}

impl AppState {
    pub fn new(drinks: Arc<dyn DrinkRepo>, gate: Arc<AccessGate>) -> Self {
        Self { drinks, gate }
    }
}

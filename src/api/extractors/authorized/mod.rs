/*!
 * Authorization extractor
 *
 * Responsibility:
 * - 認可済みリクエストの claims を handler に提供する
 * - axum 依存は core に閉じ込め、permission 名は types に分離する
 */

mod core;
mod types;

pub use types::*;

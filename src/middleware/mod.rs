/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 認可は middleware ではなく extractor (api::extractors::authorized) で行う
 */
pub mod cors;
pub mod http;

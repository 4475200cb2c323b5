/*
 * Responsibility
 * - storage 層の公開インターフェース
 */
pub mod drink_repo;
pub mod error;
#[cfg(test)]
pub mod memory;

pub use drink_repo::{DrinkRepo, DrinkRow, Ingredient, PgDrinkRepo};

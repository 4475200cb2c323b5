/**
 * Responsibility
 *
 * 主な責務
 *  - route ごとの要求 permission をタグ型として宣言する
 *
 * 置くもの
 *  - PostDrinks などのタグ型と Permission 実装
 *  - type CanPostDrinks = Authorized<PostDrinks> のような alias
 *
 * 変更理由
 *  - 保護対象の API が増えた
 */
use super::core::{Authorized, Permission};

// GET /drinks-detail
pub enum GetDrinksDetail {}
impl Permission for GetDrinksDetail {
    const NAME: &'static str = "get:drinks-detail";
}
pub type CanGetDrinksDetail = Authorized<GetDrinksDetail>;

// POST /drinks
pub enum PostDrinks {}
impl Permission for PostDrinks {
    const NAME: &'static str = "post:drinks";
}
pub type CanPostDrinks = Authorized<PostDrinks>;

// PATCH /drinks/{id}
pub enum PatchDrinks {}
impl Permission for PatchDrinks {
    const NAME: &'static str = "patch:drinks";
}
pub type CanPatchDrinks = Authorized<PatchDrinks>;

// DELETE /drinks/{id}
pub enum DeleteDrinks {}
impl Permission for DeleteDrinks {
    const NAME: &'static str = "delete:drinks";
}
pub type CanDeleteDrinks = Authorized<DeleteDrinks>;

/*
 * Responsibility
 * - /drinks 系 CRUD handler
 * - 保護された handler は第1引数の Authorized<P> で Access Gate を通過済み
 * - Json body は rejection も AppError に寄せて、エラー形式を揃える
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    api::{
        dto::drinks::{
            CreateDrinkRequest, DeleteResponse, DrinkDetail, DrinkSummary, DrinksResponse,
            UpdateDrinkRequest,
        },
        extractors::{
            DrinkId,
            authorized::{CanDeleteDrinks, CanGetDrinksDetail, CanPatchDrinks, CanPostDrinks},
        },
    },
    error::AppError,
    state::AppState,
};

pub async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<DrinkSummary>>, AppError> {
    let rows = state.drinks.list().await?;
    let drinks = rows.into_iter().map(DrinkSummary::from).collect();

    Ok(Json(DrinksResponse::new(drinks)))
}

pub async fn list_drink_details(
    auth: CanGetDrinksDetail,
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<DrinkDetail>>, AppError> {
    let rows = state.drinks.list().await?;
    tracing::debug!(sub = ?auth.claims.sub, count = rows.len(), "listing drink details");

    let drinks = rows.into_iter().map(DrinkDetail::from).collect();
    Ok(Json(DrinksResponse::new(drinks)))
}

pub async fn create_drink(
    auth: CanPostDrinks,
    State(state): State<AppState>,
    payload: Result<Json<CreateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkDetail>>, AppError> {
    let Json(req) = payload?;
    let drink = req.validate().map_err(AppError::unprocessable)?;

    let row = state.drinks.create(&drink.title, &drink.recipe).await?;
    tracing::info!(
        sub = ?auth.claims.sub,
        permission = auth.permission(),
        drink_id = row.id,
        "drink created"
    );

    Ok(Json(DrinksResponse::new(vec![DrinkDetail::from(row)])))
}

pub async fn update_drink(
    auth: CanPatchDrinks,
    State(state): State<AppState>,
    DrinkId(drink_id): DrinkId,
    payload: Result<Json<UpdateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkDetail>>, AppError> {
    let Json(req) = payload?;
    let changes = req.validate().map_err(AppError::unprocessable)?;

    let row = state
        .drinks
        .update(drink_id, changes.title.as_deref(), changes.recipe.as_deref())
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(
        sub = ?auth.claims.sub,
        permission = auth.permission(),
        drink_id,
        "drink updated"
    );

    Ok(Json(DrinksResponse::new(vec![DrinkDetail::from(row)])))
}

pub async fn delete_drink(
    auth: CanDeleteDrinks,
    State(state): State<AppState>,
    DrinkId(drink_id): DrinkId,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.drinks.delete(drink_id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    tracing::info!(
        sub = ?auth.claims.sub,
        permission = auth.permission(),
        drink_id,
        "drink deleted"
    );

    Ok(Json(DeleteResponse {
        success: true,
        delete: drink_id,
    }))
}

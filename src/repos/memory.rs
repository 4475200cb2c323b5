//! In-memory `DrinkRepo` for handler tests. Mirrors the unique-title constraint.
use async_trait::async_trait;
use sqlx::types::Json;
use tokio::sync::Mutex;

use crate::repos::drink_repo::{DrinkRepo, DrinkRow, Ingredient};
use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Default)]
pub struct MemoryDrinkRepo {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    rows: Vec<DrinkRow>,
}

#[async_trait]
impl DrinkRepo for MemoryDrinkRepo {
    async fn list(&self) -> RepoResult<Vec<DrinkRow>> {
        Ok(self.inner.lock().await.rows.clone())
    }

    async fn create(&self, title: &str, recipe: &[Ingredient]) -> RepoResult<DrinkRow> {
        let mut inner = self.inner.lock().await;
        if inner.rows.iter().any(|r| r.title == title) {
            return Err(RepoError::Conflict);
        }

        inner.next_id += 1;
        let row = DrinkRow {
            id: inner.next_id,
            title: title.to_string(),
            recipe: Json(recipe.to_vec()),
        };
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        recipe: Option<&[Ingredient]>,
    ) -> RepoResult<Option<DrinkRow>> {
        let mut inner = self.inner.lock().await;
        if !inner.rows.iter().any(|r| r.id == id) {
            return Ok(None);
        }
        if let Some(title) = title
            && inner.rows.iter().any(|r| r.id != id && r.title == title)
        {
            return Err(RepoError::Conflict);
        }

        let Some(row) = inner.rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(title) = title {
            row.title = title.to_string();
        }
        if let Some(recipe) = recipe {
            row.recipe = Json(recipe.to_vec());
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut inner = self.inner.lock().await;
        let before = inner.rows.len();
        inner.rows.retain(|r| r.id != id);
        Ok(inner.rows.len() < before)
    }
}

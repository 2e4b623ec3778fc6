use garde::Validate;
use sqlx::SqlitePool;

use super::{delete_by_id, now};
use crate::entity::Entity;
use crate::error::{DataError, DataResult};
use crate::models::{Category, NewCategory};

#[derive(Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All categories ordered by name, for navigation.
    pub async fn list(&self) -> DataResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_time, last_modified_time FROM categories ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn get(&self, id: i64) -> DataResult<Category> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, created_time, last_modified_time FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DataError::not_found(Category::label(), id))
    }

    pub async fn create(&self, new: NewCategory) -> DataResult<Category> {
        new.validate()?;
        let created = now();
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, created_time, last_modified_time) VALUES (?, ?, ?) \
             RETURNING id, name, created_time, last_modified_time",
        )
        .bind(&new.name)
        .bind(created)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn rename(&self, id: i64, name: impl Into<String>) -> DataResult<Category> {
        let change = NewCategory::new(name);
        change.validate()?;
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = ?, last_modified_time = ? WHERE id = ? \
             RETURNING id, name, created_time, last_modified_time",
        )
        .bind(&change.name)
        .bind(now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DataError::not_found(Category::label(), id))
    }

    /// Delete a category. Its articles stay, with their category cleared.
    pub async fn delete(&self, id: i64) -> DataResult<()> {
        delete_by_id::<Category, _>(&self.pool, id).await?;
        tracing::info!(category_id = id, "category deleted");
        Ok(())
    }
}

use garde::Validate;
use sqlx::SqlitePool;

use super::{delete_by_id, now};
use crate::entity::Entity;
use crate::error::{DataError, DataResult};
use crate::models::{NewTag, Tag};

#[derive(Clone)]
pub struct TagRepository {
    pool: SqlitePool,
}

impl TagRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All tags ordered by name, for the tag cloud.
    pub async fn list(&self) -> DataResult<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT id, name, created_time, last_modified_time FROM tags ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tags)
    }

    pub async fn get(&self, id: i64) -> DataResult<Tag> {
        sqlx::query_as::<_, Tag>(
            "SELECT id, name, created_time, last_modified_time FROM tags WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DataError::not_found(Tag::label(), id))
    }

    pub async fn create(&self, new: NewTag) -> DataResult<Tag> {
        new.validate()?;
        let created = now();
        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name, created_time, last_modified_time) VALUES (?, ?, ?) \
             RETURNING id, name, created_time, last_modified_time",
        )
        .bind(&new.name)
        .bind(created)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;
        Ok(tag)
    }

    pub async fn rename(&self, id: i64, name: impl Into<String>) -> DataResult<Tag> {
        let change = NewTag::new(name);
        change.validate()?;
        sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = ?, last_modified_time = ? WHERE id = ? \
             RETURNING id, name, created_time, last_modified_time",
        )
        .bind(&change.name)
        .bind(now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DataError::not_found(Tag::label(), id))
    }

    /// Delete a tag. Articles only lose the membership.
    pub async fn delete(&self, id: i64) -> DataResult<()> {
        delete_by_id::<Tag, _>(&self.pool, id).await?;
        tracing::info!(tag_id = id, "tag deleted");
        Ok(())
    }
}

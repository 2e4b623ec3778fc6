use garde::Validate;
use sqlx::SqlitePool;

use super::{delete_by_id, ensure_exists, now};
use crate::error::DataResult;
use crate::models::{Article, Comment, NewComment};

/// Reader comments. A comment's lifetime is bounded by its article: deleting
/// the article deletes them.
#[derive(Clone)]
pub struct CommentRepository {
    pool: SqlitePool,
}

impl CommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Comments of an article, oldest first.
    pub async fn list_for_article(&self, article_id: i64) -> DataResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, user_name, body, created_time, article_id FROM blog_comments \
             WHERE article_id = ? ORDER BY created_time, id",
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    /// Validate and store a comment; `NotFound` if the article is gone.
    pub async fn create(&self, new: NewComment) -> DataResult<Comment> {
        new.validate()?;
        let mut tx = self.pool.begin().await?;
        ensure_exists::<Article, _>(&mut *tx, new.article_id).await?;
        let comment = sqlx::query_as::<_, Comment>(
            "INSERT INTO blog_comments (user_name, body, created_time, article_id) \
             VALUES (?, ?, ?, ?) RETURNING id, user_name, body, created_time, article_id",
        )
        .bind(&new.user_name)
        .bind(&new.body)
        .bind(now())
        .bind(new.article_id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(comment)
    }

    pub async fn delete(&self, id: i64) -> DataResult<()> {
        delete_by_id::<Comment, _>(&self.pool, id).await
    }
}

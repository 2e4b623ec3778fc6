use garde::Validate;
use sqlx::{Executor, Sqlite, SqlitePool};

use super::search::TitleMatcher;
use super::{delete_by_id, ensure_exists, now};
use crate::entity::Entity;
use crate::error::{DataError, DataResult};
use crate::models::{Article, ArticleChanges, ArticleStatus, Category, NewArticle, Tag};

/// Every article query selects the same columns, with the category name
/// joined in.
macro_rules! select_articles {
    ($($tail:literal),* $(,)?) => {
        concat!(
            "SELECT a.id, a.title, a.body, a.created_time, a.last_modified_time, a.status, \
             a.abstract, a.views, a.likes, a.topped, a.category_id, c.name AS category_name \
             FROM articles a LEFT JOIN categories c ON c.id = a.category_id ",
            $($tail),*
        )
    };
}

/// Articles and everything hanging off them: listing queries, search, the
/// view and like counters and tag membership.
///
/// Listing queries only ever return published articles, newest modification
/// first.
#[derive(Clone)]
pub struct ArticleRepository {
    pool: SqlitePool,
}

impl ArticleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_published(&self) -> DataResult<Vec<Article>> {
        let articles = sqlx::query_as::<_, Article>(select_articles!(
            "WHERE a.status = ? ",
            "ORDER BY a.last_modified_time DESC, a.id DESC"
        ))
        .bind(ArticleStatus::Published)
        .fetch_all(&self.pool)
        .await?;
        Ok(articles)
    }

    /// Published articles in a category; `NotFound` for an unknown category.
    pub async fn list_by_category(&self, category_id: i64) -> DataResult<Vec<Article>> {
        ensure_exists::<Category, _>(&self.pool, category_id).await?;
        let articles = sqlx::query_as::<_, Article>(select_articles!(
            "WHERE a.status = ? AND a.category_id = ? ",
            "ORDER BY a.last_modified_time DESC, a.id DESC"
        ))
        .bind(ArticleStatus::Published)
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(articles)
    }

    /// Published articles carrying a tag; `NotFound` for an unknown tag.
    pub async fn list_by_tag(&self, tag_id: i64) -> DataResult<Vec<Article>> {
        ensure_exists::<Tag, _>(&self.pool, tag_id).await?;
        let articles = sqlx::query_as::<_, Article>(select_articles!(
            "JOIN article_tags m ON m.article_id = a.id ",
            "WHERE a.status = ? AND m.tag_id = ? ",
            "ORDER BY a.last_modified_time DESC, a.id DESC"
        ))
        .bind(ArticleStatus::Published)
        .bind(tag_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(articles)
    }

    /// Published articles whose title matches `query`.
    ///
    /// A linear scan over the published listing, O(n) in the number of
    /// articles, with no index and no ranking: matches keep listing order.
    /// An empty query matches nothing and does not touch the database.
    pub async fn search(&self, query: &str) -> DataResult<Vec<Article>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let matcher = TitleMatcher::new(query);
        let articles = self.list_published().await?;
        Ok(articles
            .into_iter()
            .filter(|article| matcher.matches(&article.title))
            .collect())
    }

    /// Any article, published or not.
    pub async fn get_by_id(&self, id: i64) -> DataResult<Article> {
        fetch_article(&self.pool, id).await
    }

    /// Count one detail-page view and return the updated article.
    ///
    /// The increment happens in a single `UPDATE`, so concurrent views of
    /// the same article are never lost. It does not touch
    /// `last_modified_time`.
    pub async fn record_view(&self, id: i64) -> DataResult<Article> {
        self.bump_counter("views", id).await?;
        self.get_by_id(id).await
    }

    pub async fn add_like(&self, id: i64) -> DataResult<Article> {
        self.bump_counter("likes", id).await?;
        self.get_by_id(id).await
    }

    async fn bump_counter(&self, column: &'static str, id: i64) -> DataResult<()> {
        let sql = format!("UPDATE articles SET {column} = {column} + 1 WHERE id = ?");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DataError::not_found(Article::label(), id));
        }
        Ok(())
    }

    pub async fn create(&self, new: NewArticle) -> DataResult<Article> {
        new.validate()?;
        let mut tx = self.pool.begin().await?;
        if let Some(category_id) = new.category_id {
            ensure_exists::<Category, _>(&mut *tx, category_id).await?;
        }

        let created = now();
        let id = sqlx::query(
            "INSERT INTO articles \
             (title, body, created_time, last_modified_time, status, abstract, topped, category_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.title)
        .bind(&new.body)
        .bind(created)
        .bind(created)
        .bind(new.status)
        .bind(&new.summary)
        .bind(new.topped)
        .bind(new.category_id)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        replace_tags(&mut tx, id, &new.tag_ids).await?;
        let article = fetch_article(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::info!(article_id = id, title = %article.title, status = ?article.status, "article created");
        Ok(article)
    }

    /// Apply `changes` and stamp a new `last_modified_time`.
    pub async fn update(&self, id: i64, changes: ArticleChanges) -> DataResult<Article> {
        let mut tx = self.pool.begin().await?;
        let existing = fetch_article(&mut *tx, id).await?;
        let merged = changes.apply(existing);
        merged.validate()?;
        if let Some(category_id) = merged.category_id {
            ensure_exists::<Category, _>(&mut *tx, category_id).await?;
        }

        sqlx::query(
            "UPDATE articles SET title = ?, body = ?, status = ?, abstract = ?, topped = ?, \
             category_id = ?, last_modified_time = ? WHERE id = ?",
        )
        .bind(&merged.title)
        .bind(&merged.body)
        .bind(merged.status)
        .bind(&merged.summary)
        .bind(merged.topped)
        .bind(merged.category_id)
        .bind(now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let article = fetch_article(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(article)
    }

    /// Delete an article together with its comments and tag memberships.
    pub async fn delete(&self, id: i64) -> DataResult<()> {
        delete_by_id::<Article, _>(&self.pool, id).await?;
        tracing::info!(article_id = id, "article deleted");
        Ok(())
    }

    /// Replace the article's tag set.
    pub async fn set_tags(&self, id: i64, tag_ids: &[i64]) -> DataResult<()> {
        let mut tx = self.pool.begin().await?;
        ensure_exists::<Article, _>(&mut *tx, id).await?;
        replace_tags(&mut tx, id, tag_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Tags of an article, by name.
    pub async fn tags_of(&self, id: i64) -> DataResult<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.created_time, t.last_modified_time \
             FROM tags t JOIN article_tags m ON m.tag_id = t.id \
             WHERE m.article_id = ? ORDER BY t.name, t.id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tags)
    }
}

async fn fetch_article<'c, X>(executor: X, id: i64) -> DataResult<Article>
where
    X: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as::<_, Article>(select_articles!("WHERE a.id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DataError::not_found(Article::label(), id))
}

async fn replace_tags(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    article_id: i64,
    tag_ids: &[i64],
) -> DataResult<()> {
    sqlx::query("DELETE FROM article_tags WHERE article_id = ?")
        .bind(article_id)
        .execute(&mut **tx)
        .await?;
    for &tag_id in tag_ids {
        ensure_exists::<Tag, _>(&mut **tx, tag_id).await?;
        sqlx::query("INSERT OR IGNORE INTO article_tags (article_id, tag_id) VALUES (?, ?)")
            .bind(article_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

//! # quill-data
//!
//! The blog's relational schema and every query the site runs, on
//! [SQLx](https://github.com/launchbadge/sqlx) with SQLite.
//!
//! | Repository | Owns |
//! |------------|------|
//! | [`ArticleRepository`] | articles, their tag memberships, listing/search queries, view and like counters |
//! | [`CategoryRepository`] | categories (deleting one empties the articles' reference) |
//! | [`TagRepository`] | tags (deleting one drops its memberships) |
//! | [`CommentRepository`] | reader comments, removed with their article |
//! | [`SuggestionRepository`] | visitor suggestions |
//!
//! Every write validates its input first and fails with
//! [`DataError::Validation`] instead of truncating or coercing.
//!
//! Queries are plain functions with typed parameters:
//!
//! ```ignore
//! let pool = quill_data::connect("sqlite::memory:", 1).await?;
//! quill_data::migrate(&pool).await?;
//!
//! let articles = ArticleRepository::new(pool.clone());
//! let tech = CategoryRepository::new(pool.clone()).create(NewCategory::new("Tech")).await?;
//! articles.create(NewArticle::published("Hello", "*hi*").in_category(tech.id)).await?;
//! let listed = articles.list_by_category(tech.id).await?;
//! ```

pub mod entity;
pub mod error;
pub mod models;
pub mod repository;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub use entity::Entity;
pub use error::{DataError, DataResult};
pub use models::*;
pub use repository::{
    ArticleRepository, CategoryRepository, CommentRepository, SuggestionRepository, TagRepository,
};

/// Open a connection pool. Foreign keys are enforced on every connection and
/// file databases are created on first use.
pub async fn connect(url: &str, max_connections: u32) -> DataResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    tracing::debug!(url, max_connections, "database pool ready");
    Ok(pool)
}

/// Apply the embedded schema migrations.
pub async fn migrate(pool: &SqlitePool) -> DataResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("database schema up to date");
    Ok(())
}

/// Round-trip to the database, used by the health endpoint.
pub async fn ping(pool: &SqlitePool) -> DataResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

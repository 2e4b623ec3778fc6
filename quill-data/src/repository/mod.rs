mod article;
mod category;
mod comment;
mod search;
mod suggestion;
mod tag;

pub use article::ArticleRepository;
pub use category::CategoryRepository;
pub use comment::CommentRepository;
pub use suggestion::SuggestionRepository;
pub use tag::TagRepository;

use chrono::{DateTime, SubsecRound, Utc};
use sqlx::{Executor, Sqlite};

use crate::entity::Entity;
use crate::error::{DataError, DataResult};

/// Current time, truncated to microseconds so stored values round-trip.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub(crate) async fn exists<'c, T, X>(executor: X, id: i64) -> DataResult<bool>
where
    T: Entity,
    X: Executor<'c, Database = Sqlite>,
{
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?)",
        T::table_name(),
        T::id_column()
    );
    let found: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(executor).await?;
    Ok(found)
}

/// Fails with `NotFound` unless a `T` with `id` exists.
pub(crate) async fn ensure_exists<'c, T, X>(executor: X, id: i64) -> DataResult<()>
where
    T: Entity,
    X: Executor<'c, Database = Sqlite>,
{
    if exists::<T, X>(executor, id).await? {
        Ok(())
    } else {
        Err(DataError::not_found(T::label(), id))
    }
}

pub(crate) async fn delete_by_id<'c, T, X>(executor: X, id: i64) -> DataResult<()>
where
    T: Entity,
    X: Executor<'c, Database = Sqlite>,
{
    let sql = format!("DELETE FROM {} WHERE {} = ?", T::table_name(), T::id_column());
    let result = sqlx::query(&sql).bind(id).execute(executor).await?;
    if result.rows_affected() == 0 {
        return Err(DataError::not_found(T::label(), id));
    }
    Ok(())
}

pub(crate) async fn count<'c, T, X>(executor: X) -> DataResult<u64>
where
    T: Entity,
    X: Executor<'c, Database = Sqlite>,
{
    let sql = format!("SELECT COUNT(*) FROM {}", T::table_name());
    let total: i64 = sqlx::query_scalar(&sql).fetch_one(executor).await?;
    Ok(total as u64)
}

use garde::Validate;
use sqlx::SqlitePool;

use super::{count, now};
use crate::error::DataResult;
use crate::models::{NewSuggestion, Suggestion};

#[derive(Clone)]
pub struct SuggestionRepository {
    pool: SqlitePool,
}

impl SuggestionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewSuggestion) -> DataResult<Suggestion> {
        new.validate()?;
        let suggestion = sqlx::query_as::<_, Suggestion>(
            "INSERT INTO suggestions (suggest, suggest_time) VALUES (?, ?) \
             RETURNING id, suggest, suggest_time",
        )
        .bind(&new.suggest)
        .bind(now())
        .fetch_one(&self.pool)
        .await?;
        Ok(suggestion)
    }

    /// Newest first.
    pub async fn list(&self) -> DataResult<Vec<Suggestion>> {
        let suggestions = sqlx::query_as::<_, Suggestion>(
            "SELECT id, suggest, suggest_time FROM suggestions ORDER BY suggest_time DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(suggestions)
    }

    pub async fn count(&self) -> DataResult<u64> {
        count::<Suggestion, _>(&self.pool).await
    }
}

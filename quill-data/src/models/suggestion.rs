use chrono::{DateTime, Utc};
use garde::Validate;
use quill_core::not_blank;
use serde::Serialize;

use crate::entity::Entity;

/// Maximum length of a suggestion, in characters.
pub const SUGGESTION_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Suggestion {
    pub id: i64,
    pub suggest: String,
    pub suggest_time: DateTime<Utc>,
}

impl Entity for Suggestion {
    fn table_name() -> &'static str {
        "suggestions"
    }

    fn label() -> &'static str {
        "Suggestion"
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewSuggestion {
    #[garde(length(chars, min = 1, max = 200), custom(not_blank))]
    pub suggest: String,
}

impl NewSuggestion {
    pub fn new(suggest: impl Into<String>) -> Self {
        Self {
            suggest: suggest.into(),
        }
    }
}

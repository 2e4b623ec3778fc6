use chrono::{DateTime, Utc};
use garde::Validate;
use quill_core::not_blank;
use serde::Serialize;

use crate::entity::Entity;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_time: DateTime<Utc>,
    pub last_modified_time: DateTime<Utc>,
}

impl Entity for Category {
    fn table_name() -> &'static str {
        "categories"
    }

    fn label() -> &'static str {
        "Category"
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewCategory {
    #[garde(length(chars, min = 1, max = 20), custom(not_blank))]
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

use chrono::{DateTime, Utc};
use garde::Validate;
use quill_core::not_blank;
use serde::Serialize;

use crate::entity::Entity;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub created_time: DateTime<Utc>,
    pub last_modified_time: DateTime<Utc>,
}

impl Entity for Tag {
    fn table_name() -> &'static str {
        "tags"
    }

    fn label() -> &'static str {
        "Tag"
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewTag {
    #[garde(length(chars, min = 1, max = 20), custom(not_blank))]
    pub name: String,
}

impl NewTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
